use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::SeedParseError;

/// Stream selector shared by every game; only the state half comes from the seed.
const STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

/// Characters escaped in a `?seed=` value: everything but RFC 3986 unreserved.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash.
///
/// Stable across platforms and releases, unlike `std`'s default hasher.
const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Deterministic random source for one game.
///
/// The generator state is threaded explicitly: [`SeededRng::next`] consumes the
/// state and hands back the value together with the successor state, so replaying
/// a seed is a pure function of the seed and the number of draws.
///
/// # Example
///
/// ```
/// use shape_sorter_engine::SeededRng;
///
/// let rng = SeededRng::from_seed_str("abc");
/// let (a, rng) = rng.next();
/// let (b, _) = rng.next();
///
/// let replay = SeededRng::from_seed_str("abc");
/// let (a2, replay) = replay.next();
/// let (b2, _) = replay.next();
/// assert_eq!((a, b), (a2, b2));
/// assert!((0.0..1.0).contains(&a));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    inner: Pcg32,
}

impl SeededRng {
    /// Creates the generator for a string seed by hashing it to a numeric state.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::from_u64(fnv1a_64(seed.as_bytes()))
    }

    /// Creates the generator for a numeric seed; no hashing is applied.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: Pcg32::new(seed, STREAM),
        }
    }

    /// Returns a value in `[0, 1)` and the successor state.
    #[must_use]
    pub fn next(self) -> (f64, Self) {
        let mut inner = self.inner;
        let value = inner.random::<f64>();
        (value, Self { inner })
    }
}

/// Identifier of a game: the string that fixes its whole shape sequence.
///
/// A seed is any string of 1 to [`GameSeed::MAX_LEN`] characters without
/// control characters. It is percent-encoded when embedded in a share link.
///
/// # Example
///
/// ```
/// use shape_sorter_engine::GameSeed;
///
/// let seed: GameSeed = "abc".parse().unwrap();
/// assert_eq!(seed.share_url("https://example.com/"), "https://example.com/?seed=abc");
/// assert!("".parse::<GameSeed>().is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct GameSeed(String);

impl GameSeed {
    pub const MAX_LEN: usize = 64;

    /// Length of seeds produced by [`GameSeed::generate`].
    pub const GENERATED_LEN: usize = 8;

    /// Generates a fresh seed from the thread-local OS-seeded generator.
    ///
    /// This is the only use of ambient entropy: once chosen, the seed string
    /// alone determines the game.
    #[must_use]
    pub fn generate() -> Self {
        rand::rng().random()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the generator positioned at the start of this seed's sequence.
    #[must_use]
    pub fn rng(&self) -> SeededRng {
        SeededRng::from_seed_str(&self.0)
    }

    /// Builds a link that reopens this game, appending `seed` to `base`'s query.
    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        let separator = if base.contains('?') { '&' } else { '?' };
        let seed = utf8_percent_encode(&self.0, QUERY_VALUE);
        format!("{base}{separator}seed={seed}")
    }
}

impl FromStr for GameSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SeedParseError::Empty);
        }
        let len = s.chars().count();
        if len > Self::MAX_LEN {
            return Err(SeedParseError::TooLong {
                len,
                max: Self::MAX_LEN,
            });
        }
        if let Some(ch) = s.chars().find(|ch| ch.is_control()) {
            return Err(SeedParseError::InvalidChar { ch });
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for GameSeed {
    type Error = SeedParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameSeed> for String {
    fn from(value: GameSeed) -> Self {
        value.0
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let seed = (0..GameSeed::GENERATED_LEN)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        GameSeed(seed)
    }
}
