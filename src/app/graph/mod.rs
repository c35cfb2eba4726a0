mod build;
mod interaction;
mod view;

pub(in crate::app) use build::compute_visible_set;
