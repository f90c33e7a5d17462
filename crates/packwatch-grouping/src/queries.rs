/// Search phrases a listing must contain (case-insensitively) to be scanned at all.
///
/// Used when a shop does not override `queries` in `shops.yaml`. The list
/// spells out every storefront variant of the tracked releases, since
/// matching is plain substring search.
pub const DEFAULT_QUERIES: &[&str] = &[
    "crown zenith",
    "prismatic evolution",
    "prismatic evolutions",
    "pokemon 151",
    "pokémon 151",
    "pokemon151",
    "pokémon151",
    "sv 151",
    "sv: 151",
    "sv-151",
    "sv_151",
    "sv151",
    "s&v 151",
    "s&v: 151",
    "s&v-151",
    "s&v151",
    "s/v 151",
    "scarlet & violet 151",
    "scarlet and violet 151",
    "scarlet violet 151",
    "mega evolution",
    "mega evolutions",
    "ascended heroes",
    "phantasmal flames",
    "perfect order",
];
