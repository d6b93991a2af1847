//! Permutation: a cycle-notation bijection over an alphabet's indices.
//!
//! The wiring is kept as one canonical pair of array-backed tables, a
//! forward map `index -> index` and its precomputed inverse, so the two
//! directions can never drift apart. Symbol-level operations are derived
//! by composing the tables with the alphabet's index mapping.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// Wiring state of a [`Permutation`].
///
/// `Unconfigured` is the derangement marker: the designated "no real
/// permutation configured" placeholder (for example, a machine with no
/// plugboard wired). `permute` and `invert` pass their input through
/// unchanged in this state. It is distinct from a configured permutation
/// whose cycles happen to map every symbol to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Wiring {
    Unconfigured,
    Configured {
        forward: Vec<usize>,
        inverse: Vec<usize>,
        /// Which indices have been claimed by a declared cycle. A
        /// singleton cycle `(X)` claims its symbol, so a declared fixed
        /// point still conflicts with a later cycle naming the same
        /// symbol.
        mapped: Vec<bool>,
    },
}

/// A bijection over the index space of an [`Alphabet`], expressed in
/// cycle notation.
///
/// Symbols not mentioned in any cycle map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Alphabet,
    wiring: Wiring,
}

impl Permutation {
    /// Builds a permutation from `cycles`, a string of parenthesized
    /// groups such as `"(ABC) (DE)"`. Whitespace is ignored.
    ///
    /// Within a group of length `m`, the symbol at position `i` maps
    /// forward to the symbol at `i + 1 mod m`. An empty `cycles` string
    /// produces the derangement marker, whose `permute`/`invert` return
    /// their input unchanged; a non-empty string with no groups (such as
    /// `"()"`) produces a configured identity instead.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if a cycle names a symbol
    /// outside `alphabet`, or [`EnigmaError::DuplicateSymbol`] if a
    /// symbol appears in more than one cycle (or twice in one).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// let perm = Permutation::new("(BACD)", alpha).unwrap();
    /// assert_eq!(perm.permute(1), 0);
    /// assert_eq!(perm.invert(0), 1);
    /// assert_eq!(perm.permute_char('D').unwrap(), 'B');
    /// ```
    pub fn new(cycles: &str, alphabet: Alphabet) -> Result<Self, EnigmaError> {
        let stripped: String = cycles.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return Ok(Permutation {
                alphabet,
                wiring: Wiring::Unconfigured,
            });
        }
        let mut perm = Permutation {
            alphabet,
            wiring: Wiring::Unconfigured,
        };
        perm.configure_identity();
        for group in stripped.split(['(', ')']).filter(|g| !g.is_empty()) {
            perm.add_cycle(group)?;
        }
        Ok(perm)
    }

    /// Splices the cycle `c0 -> c1 -> ... -> cm -> c0` into the wiring,
    /// where `cycle` is the string `c0c1...cm`. Whitespace is ignored.
    ///
    /// Adding a cycle to the derangement marker first turns it into a
    /// configured identity.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] for a symbol outside the
    /// alphabet, or [`EnigmaError::DuplicateSymbol`] for a symbol already
    /// claimed by a cycle.
    pub fn add_cycle(&mut self, cycle: &str) -> Result<(), EnigmaError> {
        let mut indices: Vec<usize> = Vec::new();
        for ch in cycle.chars().filter(|c| !c.is_whitespace()) {
            let idx = self.alphabet.to_int(ch)?;
            if indices.contains(&idx) {
                return Err(EnigmaError::DuplicateSymbol);
            }
            indices.push(idx);
        }
        if indices.is_empty() {
            return Ok(());
        }
        self.configure_identity();
        if let Wiring::Configured {
            forward,
            inverse,
            mapped,
        } = &mut self.wiring
        {
            for &idx in &indices {
                if mapped[idx] {
                    return Err(EnigmaError::DuplicateSymbol);
                }
            }
            for (i, &idx) in indices.iter().enumerate() {
                let next = indices[(i + 1) % indices.len()];
                forward[idx] = next;
                inverse[next] = idx;
                mapped[idx] = true;
            }
        }
        Ok(())
    }

    /// Installs identity tables if no wiring is configured yet.
    fn configure_identity(&mut self) {
        if let Wiring::Unconfigured = self.wiring {
            let size = self.alphabet.size();
            self.wiring = Wiring::Configured {
                forward: (0..size).collect(),
                inverse: (0..size).collect(),
                mapped: vec![false; size],
            };
        }
    }

    /// Returns the number of indices this permutation ranges over.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation was built against.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns true iff this is the derangement marker (no wiring
    /// configured; every input passes through unchanged).
    pub fn is_derangement(&self) -> bool {
        matches!(self.wiring, Wiring::Unconfigured)
    }

    /// Applies the permutation to `p` reduced modulo the size, so
    /// out-of-range integers wrap rather than error. The derangement
    /// marker returns `p` unchanged.
    pub fn permute(&self, p: i32) -> i32 {
        match &self.wiring {
            Wiring::Unconfigured => p,
            Wiring::Configured { forward, .. } if forward.is_empty() => p,
            Wiring::Configured { forward, .. } => forward[self.wrap(p)] as i32,
        }
    }

    /// Applies the inverse permutation to `c` reduced modulo the size.
    /// The derangement marker returns `c` unchanged.
    pub fn invert(&self, c: i32) -> i32 {
        match &self.wiring {
            Wiring::Unconfigured => c,
            Wiring::Configured { inverse, .. } if inverse.is_empty() => c,
            Wiring::Configured { inverse, .. } => inverse[self.wrap(c)] as i32,
        }
    }

    /// Applies the permutation to the symbol `ch`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if `ch` is not a symbol of
    /// the alphabet (checked even under the derangement marker).
    pub fn permute_char(&self, ch: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_int(ch)?;
        match &self.wiring {
            Wiring::Unconfigured => Ok(ch),
            Wiring::Configured { forward, .. } => self.alphabet.to_char(forward[idx]),
        }
    }

    /// Applies the inverse permutation to the symbol `ch`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if `ch` is not a symbol of
    /// the alphabet.
    pub fn invert_char(&self, ch: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_int(ch)?;
        match &self.wiring {
            Wiring::Unconfigured => Ok(ch),
            Wiring::Configured { inverse, .. } => self.alphabet.to_char(inverse[idx]),
        }
    }

    /// Reduces `p` modulo the alphabet size into `0..size`.
    fn wrap(&self, p: i32) -> usize {
        p.rem_euclid(self.alphabet.size() as i32) as usize
    }
}
