/// Fallback dataset used when no record file is given or the given one fails
/// to load. Small enough to eyeball, rich enough to exercise every node and
/// edge kind.
pub(super) const SAMPLE_RECORDS: &str = r#"[
  {
    "name": "Velvet Owl",
    "role": "band",
    "genre": "krautrock",
    "locations": ["Panke Culture", "Arkaoda"],
    "collectives": ["Nachtgarten"],
    "url": "https://example.org/velvet-owl",
    "info": "Four-piece improvising around motorik grooves."
  },
  {
    "name": "Mara Lys",
    "role": "performer and dj",
    "genre": "ambient",
    "locations": ["Arkaoda"],
    "collectives": ["Nachtgarten", "Tidal Works"],
    "associates": ["Velvet Owl"],
    "info": "Modular sets at dawn, crate digging at night."
  },
  {
    "name": "DJ Brachland",
    "role": "dj",
    "genre": "techno",
    "locations": ["OHM", "Panke Culture"],
    "collectives": ["Betonliebe"],
    "url": "https://example.org/brachland"
  },
  {
    "name": "Hollow Choir",
    "role": "band",
    "genre": "darkwave",
    "locations": ["Urban Spree"],
    "collectives": ["Betonliebe"],
    "info": "Tape loops and two drummers."
  },
  {
    "name": "Selin Kaya",
    "role": "singer",
    "genre": "anatolian psych",
    "locations": ["Arkaoda", "Urban Spree"],
    "collectives": ["Tidal Works"]
  },
  {
    "name": "Paul Nowak",
    "role": "promoter",
    "genre": "",
    "locations": ["OHM"],
    "collectives": ["Betonliebe"],
    "associates": ["DJ Brachland", "Hollow Choir"],
    "info": "Books the monthly concrete-music series."
  },
  {
    "name": "Ferro",
    "role": "dj and producer",
    "genre": "techno",
    "locations": ["OHM"],
    "collectives": [],
    "url": "https://example.org/ferro"
  },
  {
    "name": "Luz Marina",
    "role": "performer",
    "genre": "cumbia",
    "locations": ["Panke Culture"],
    "collectives": ["Nachtgarten"]
  },
  {
    "name": "Tidal Works Soundsystem",
    "role": "band",
    "genre": "dub",
    "locations": ["Urban Spree"],
    "collectives": ["Tidal Works"]
  },
  {
    "name": "Anka",
    "role": "dj",
    "genre": "ambient",
    "locations": ["Arkaoda"],
    "collectives": ["Nachtgarten"],
    "associates": ["Mara Lys"]
  }
]"#;
