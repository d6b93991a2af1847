//! Rotor: a permutation with a rotational position and a ring offset.
//!
//! The three rotor kinds form a closed set, so every capability check
//! (`rotates`, `reflecting`, `at_notch`) dispatches over the same enum
//! and no combination can go unhandled.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// The capability class of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Routes the signal but never advances.
    Fixed,
    /// Advances under the pawl mechanism. `notches` are the positions
    /// (as alphabet indices) at which the rotor lets its left neighbor
    /// advance.
    Moving { notches: Vec<usize> },
    /// Folds the signal path back through the rotor bank. Its position
    /// is pinned at 0 and its ring has no effect.
    Reflector,
}

/// A named rotor: wiring plus mutable rotational state.
///
/// Catalog entries act as immutable templates; a machine clones a fresh
/// instance per slot at assembly time, so position changes never leak
/// between machines.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    position: i32,
    ring: i32,
}

impl Rotor {
    /// Creates a non-rotating, non-reflecting rotor.
    pub fn fixed(name: &str, permutation: Permutation) -> Rotor {
        Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Fixed,
            position: 0,
            ring: 0,
        }
    }

    /// Creates a rotating rotor whose notches sit at the symbols of
    /// `notches`. A rotor with no notches routes signals but cannot
    /// rotate.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if a notch symbol is not in
    /// the rotor's alphabet.
    pub fn moving(name: &str, permutation: Permutation, notches: &str) -> Result<Rotor, EnigmaError> {
        let mut notch_indices = Vec::new();
        for ch in notches.chars().filter(|c| !c.is_whitespace()) {
            notch_indices.push(permutation.alphabet().to_int(ch)?);
        }
        Ok(Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Moving {
                notches: notch_indices,
            },
            position: 0,
            ring: 0,
        })
    }

    /// Creates a reflector. Its position stays 0 for its whole life.
    pub fn reflector(name: &str, permutation: Permutation) -> Rotor {
        Rotor {
            name: name.to_string(),
            permutation,
            kind: RotorKind::Reflector,
            position: 0,
            ring: 0,
        }
    }

    /// Returns my name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns my kind.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns my permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns my alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        self.permutation.alphabet()
    }

    /// Returns the size of my alphabet.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns true iff I have a ratchet and can move: a moving rotor
    /// with at least one notch.
    pub fn rotates(&self) -> bool {
        matches!(&self.kind, RotorKind::Moving { notches } if !notches.is_empty())
    }

    /// Returns true iff I reflect.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns my current position.
    pub fn setting(&self) -> i32 {
        self.position
    }

    /// Returns my ring offset.
    pub fn ring(&self) -> i32 {
        self.ring
    }

    /// Sets my position to `posn`, reduced modulo the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadAssembly`] for a reflector unless the
    /// reduced position is 0.
    pub fn set(&mut self, posn: i32) -> Result<(), EnigmaError> {
        let posn = self.wrap(posn);
        if self.reflecting() && posn != 0 {
            return Err(EnigmaError::BadAssembly);
        }
        self.position = posn;
        Ok(())
    }

    /// Sets my position to the index of the symbol `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] for a foreign symbol, or
    /// [`EnigmaError::BadAssembly`] for a nonzero reflector position.
    pub fn set_char(&mut self, cposn: char) -> Result<(), EnigmaError> {
        let idx = self.alphabet().to_int(cposn)?;
        self.set(idx as i32)
    }

    /// Sets my ring offset, reduced modulo the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadAssembly`] for a reflector unless the
    /// reduced offset is 0 (a reflector has no ring effect).
    pub fn set_ring(&mut self, ring: i32) -> Result<(), EnigmaError> {
        let ring = self.wrap(ring);
        if self.reflecting() && ring != 0 {
            return Err(EnigmaError::BadAssembly);
        }
        self.ring = ring;
        Ok(())
    }

    /// Returns true iff my position lets the rotor to my left advance.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&(self.position as usize)),
            _ => false,
        }
    }

    /// Advances me one position if I am a moving rotor; otherwise does
    /// nothing.
    pub fn advance(&mut self) {
        if let RotorKind::Moving { .. } = self.kind {
            self.position = self.wrap(self.position + 1);
        }
    }

    /// Converts `p` through my wiring in the forward direction,
    /// accounting for position and ring offset.
    ///
    /// The ring setting shifts the wiring relative to the contact
    /// positions without moving the rotor itself, hence the offset
    /// `position - ring` applied on the way in and removed on the way
    /// out.
    pub fn convert_forward(&self, p: i32) -> i32 {
        let contact = self.permutation.permute(p + self.position - self.ring);
        self.wrap(contact - self.position + self.ring)
    }

    /// Converts `e` through my wiring in the backward direction; the
    /// inverse of [`convert_forward`](Self::convert_forward).
    pub fn convert_backward(&self, e: i32) -> i32 {
        let contact = self.permutation.invert(e + self.position - self.ring);
        self.wrap(contact - self.position + self.ring)
    }

    /// Reduces `p` modulo the alphabet size.
    fn wrap(&self, p: i32) -> i32 {
        let size = self.size() as i32;
        if size == 0 {
            return p;
        }
        p.rem_euclid(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(cycles: &str, chars: &str) -> Permutation {
        Permutation::new(cycles, Alphabet::new(chars).unwrap()).unwrap()
    }

    #[test]
    fn test_kinds_and_capabilities() {
        let f = Rotor::fixed("F", perm("(AB)", "ABCD"));
        let m = Rotor::moving("M", perm("(AB)", "ABCD"), "C").unwrap();
        let r = Rotor::reflector("R", perm("(AC)(BD)", "ABCD"));
        assert!(!f.rotates() && !f.reflecting());
        assert!(m.rotates() && !m.reflecting());
        assert!(!r.rotates() && r.reflecting());
    }

    #[test]
    fn test_moving_rotor_without_notches_cannot_rotate() {
        let m = Rotor::moving("M", perm("(AB)", "ABCD"), "").unwrap();
        assert!(!m.rotates());
        assert!(!m.at_notch());
    }

    #[test]
    fn test_bad_notch_symbol() {
        assert_eq!(
            Rotor::moving("M", perm("(AB)", "ABCD"), "X").err(),
            Some(EnigmaError::NotInAlphabet)
        );
    }

    #[test]
    fn test_convert_at_origin_is_bare_permutation() {
        let m = Rotor::moving("M", perm("(ABD)", "ABCD"), "C").unwrap();
        // A -> B, B -> D, C -> C, D -> A
        assert_eq!(m.convert_forward(0), 1);
        assert_eq!(m.convert_forward(1), 3);
        assert_eq!(m.convert_forward(2), 2);
        assert_eq!(m.convert_forward(3), 0);
        assert_eq!(m.convert_backward(1), 0);
        assert_eq!(m.convert_backward(0), 3);
    }

    #[test]
    fn test_position_offsets_conversion() {
        let mut m = Rotor::moving("M", perm("(ABD)", "ABCD"), "C").unwrap();
        m.set(1).unwrap();
        // wrap(permute(wrap(0 + 1)) - 1) = wrap(D - 1) = C
        assert_eq!(m.convert_forward(0), 2);
        // wrap(invert(wrap(0 + 1)) - 1) = wrap(A - 1) = D
        assert_eq!(m.convert_backward(0), 3);
    }

    #[test]
    fn test_ring_cancels_equal_position() {
        // With position == ring the offsets cancel and the rotor behaves
        // as if it sat at the origin.
        let mut m = Rotor::moving("M", perm("(ABD)", "ABCD"), "C").unwrap();
        m.set(3).unwrap();
        m.set_ring(3).unwrap();
        for p in 0..4 {
            let origin = Rotor::moving("M", perm("(ABD)", "ABCD"), "C").unwrap();
            assert_eq!(m.convert_forward(p), origin.convert_forward(p));
            assert_eq!(m.convert_backward(p), origin.convert_backward(p));
        }
    }

    #[test]
    fn test_roundtrip_under_all_offsets() {
        for pos in 0..4 {
            for ring in 0..4 {
                let mut m = Rotor::moving("M", perm("(ABD)(C)", "ABCD"), "B").unwrap();
                m.set(pos).unwrap();
                m.set_ring(ring).unwrap();
                for p in 0..4 {
                    assert_eq!(
                        m.convert_backward(m.convert_forward(p)),
                        p,
                        "pos={} ring={} p={}",
                        pos,
                        ring,
                        p
                    );
                }
            }
        }
    }

    #[test]
    fn test_set_wraps() {
        let mut m = Rotor::moving("M", perm("(AB)", "ABCD"), "C").unwrap();
        m.set(6).unwrap();
        assert_eq!(m.setting(), 2);
        m.set(-1).unwrap();
        assert_eq!(m.setting(), 3);
        m.set_char('B').unwrap();
        assert_eq!(m.setting(), 1);
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut m = Rotor::moving("M", perm("(AB)", "ABCD"), "C").unwrap();
        m.set(3).unwrap();
        m.advance();
        assert_eq!(m.setting(), 0);
    }

    #[test]
    fn test_fixed_rotor_never_advances() {
        let mut f = Rotor::fixed("F", perm("(AB)", "ABCD"));
        f.advance();
        assert_eq!(f.setting(), 0);
    }

    #[test]
    fn test_at_notch() {
        let mut m = Rotor::moving("M", perm("(AB)", "ABCD"), "CD").unwrap();
        assert!(!m.at_notch());
        m.set(2).unwrap();
        assert!(m.at_notch());
        m.set(3).unwrap();
        assert!(m.at_notch());
    }

    #[test]
    fn test_reflector_position_pinned() {
        let mut r = Rotor::reflector("R", perm("(AC)(BD)", "ABCD"));
        assert_eq!(r.set(1), Err(EnigmaError::BadAssembly));
        assert_eq!(r.set_ring(2), Err(EnigmaError::BadAssembly));
        // Multiples of the size reduce to 0 and are accepted.
        assert_eq!(r.set(4), Ok(()));
        assert_eq!(r.setting(), 0);
        r.advance();
        assert_eq!(r.setting(), 0);
    }

    #[test]
    fn test_clone_gives_independent_state() {
        let mut template = Rotor::moving("M", perm("(AB)", "ABCD"), "C").unwrap();
        let mut clone = template.clone();
        clone.set(2).unwrap();
        assert_eq!(template.setting(), 0);
        template.advance();
        assert_eq!(clone.setting(), 2);
    }
}
