//! Deterministic synthetic users dataset.

use rand::{rngs::StdRng, Rng, SeedableRng};
use scour_store::User;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John", "Ken",
    "Leslie", "Radia",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Liskov", "Ritchie", "Knuth", "Dijkstra", "Allen", "Hopper", "Backus",
    "Thompson", "Lamport", "Perlman",
];

const LOCATIONS: &[&str] = &[
    "London", "Austin", "Boston", "Berlin", "Tokyo", "Oslo", "Lagos", "Sydney", "Toronto",
    "Zurich", "Madrid", "Seoul",
];

/// Generate `count` users from a seeded RNG. The same seed always produces
/// the same dataset, so benchmark runs are comparable.
pub fn generate_users(count: u64, seed: u64) -> Vec<User> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
            User::new(id, format!("{first} {last}"), location, rng.gen_range(0..10_000))
        })
        .collect()
}
