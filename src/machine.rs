//! Machine: plugboard, rotor bank, reflector, and the stepping pawls.
//!
//! Slot 0 holds the reflector; slots 1 and up hold fixed and moving
//! rotors, left to right. Each converted symbol first advances the
//! rotors, then travels plugboard → rightmost rotor → ... → reflector →
//! ... → rightmost rotor → plugboard.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A complete rotor cipher machine.
///
/// Assembled once from a catalog of rotor templates, then driven through
/// any number of conversions. Conversions mutate only rotor positions, so
/// re-applying the starting settings restores the machine exactly.
pub struct Machine {
    alphabet: Alphabet,
    num_rotors: usize,
    pawls: usize,
    rotors: Vec<Rotor>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates an empty machine with `num_rotors` slots, of which at most
    /// `pawls` may hold rotating rotors.
    ///
    /// The plugboard starts out unwired (signals pass through it
    /// unchanged) until [`set_plugboard`](Self::set_plugboard) is called.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadAssembly`] unless `num_rotors >= 2` and
    /// `pawls < num_rotors`.
    pub fn new(alphabet: Alphabet, num_rotors: usize, pawls: usize) -> Result<Self, EnigmaError> {
        if num_rotors < 2 || pawls >= num_rotors {
            return Err(EnigmaError::BadAssembly);
        }
        let plugboard = Permutation::new("", alphabet.clone())?;
        Ok(Machine {
            alphabet,
            num_rotors,
            pawls,
            rotors: Vec::new(),
            plugboard,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls, and thus the maximum number of
    /// rotating rotors.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the common alphabet of my rotors.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the currently inserted rotors, slot 0 first. Empty before
    /// [`insert_rotors`](Self::insert_rotors) succeeds.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Returns the plugboard permutation.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Returns the current positions of the non-reflector slots, left to
    /// right, as alphabet symbols, in the same shape
    /// [`set_rotors`](Self::set_rotors) accepts.
    pub fn positions(&self) -> String {
        self.rotors
            .iter()
            .skip(1)
            .map(|r| {
                self.alphabet
                    .to_char(r.setting() as usize)
                    .expect("rotor position is a valid alphabet index")
            })
            .collect()
    }

    // ──────── Assembly ────────

    /// Fills my slots with clones of the catalog templates named by
    /// `names`, in order; `names[0]` names the reflector.
    ///
    /// Nothing is mutated unless every check passes.
    ///
    /// # Errors
    /// - [`EnigmaError::MissingRotor`] if `names` does not provide
    ///   exactly one name per slot, or a name has no catalog match.
    /// - [`EnigmaError::DuplicateRotorName`] if a name repeats.
    /// - [`EnigmaError::BadAssembly`] if slot 0 would not hold a
    ///   reflector, a reflector would sit outside slot 0, a non-rotating
    ///   rotor would sit to the right of a rotating one, or more rotating
    ///   rotors are requested than there are pawls.
    pub fn insert_rotors(&mut self, catalog: &[Rotor], names: &[&str]) -> Result<(), EnigmaError> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::MissingRotor);
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(EnigmaError::DuplicateRotorName);
            }
        }
        let mut selected: Vec<Rotor> = Vec::with_capacity(self.num_rotors);
        let mut moving = 0;
        for (slot, name) in names.iter().enumerate() {
            let template = catalog
                .iter()
                .find(|r| r.name() == *name)
                .ok_or(EnigmaError::MissingRotor)?;
            if slot == 0 && !template.reflecting() {
                return Err(EnigmaError::BadAssembly);
            }
            if slot > 0 && template.reflecting() {
                return Err(EnigmaError::BadAssembly);
            }
            if slot > 0 && !template.rotates() && moving > 0 {
                return Err(EnigmaError::BadAssembly);
            }
            if template.rotates() {
                moving += 1;
                if moving > self.pawls {
                    return Err(EnigmaError::BadAssembly);
                }
            }
            selected.push(template.clone());
        }
        self.rotors = selected;
        Ok(())
    }

    /// Sets the positions of the non-reflector slots from `setting`, one
    /// symbol per slot, left to right.
    ///
    /// The whole string is validated before any rotor moves.
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadLength`] unless `setting` has exactly
    /// `num_rotors - 1` symbols, or [`EnigmaError::NotInAlphabet`] if any
    /// symbol is foreign.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let indices = self.setting_indices(setting)?;
        for (rotor, idx) in self.rotors.iter_mut().skip(1).zip(indices) {
            rotor.set(idx as i32)?;
        }
        Ok(())
    }

    /// Sets the ring offsets of the non-reflector slots from `ring`, in
    /// the same shape as [`set_rotors`](Self::set_rotors).
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadLength`] or
    /// [`EnigmaError::NotInAlphabet`] as for `set_rotors`.
    pub fn set_ring(&mut self, ring: &str) -> Result<(), EnigmaError> {
        let indices = self.setting_indices(ring)?;
        for (rotor, idx) in self.rotors.iter_mut().skip(1).zip(indices) {
            rotor.set_ring(idx as i32)?;
        }
        Ok(())
    }

    /// Replaces the plugboard permutation.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Validates a position/ring setting string and converts it to
    /// alphabet indices.
    fn setting_indices(&self, setting: &str) -> Result<Vec<usize>, EnigmaError> {
        let chars: Vec<char> = setting.chars().collect();
        if chars.len() != self.num_rotors - 1 {
            return Err(EnigmaError::BadLength);
        }
        chars.into_iter().map(|ch| self.alphabet.to_int(ch)).collect()
    }

    // ──────── Stepping ────────

    /// Advances the rotors for one keypress.
    ///
    /// Which slots advance is decided entirely from the positions as they
    /// stand at the start of the step, then every advance is applied, so
    /// a rotor moving can never change a neighbor's notch reading within
    /// the same step. A rotating slot advances when it is the rightmost
    /// slot, when its right neighbor stands at a notch, or when it stands
    /// at its own notch with a rotating rotor on its left. The last case
    /// is the double step: the same pawl motion that advances the left
    /// neighbor drags this rotor along too.
    fn advance_rotors(&mut self) {
        let n = self.rotors.len();
        let mut will_advance = vec![false; n];
        for i in 1..n {
            if !self.rotors[i].rotates() {
                continue;
            }
            let rightmost = i == n - 1;
            let carry = i + 1 < n && self.rotors[i + 1].at_notch();
            let double_step = self.rotors[i].at_notch() && self.rotors[i - 1].rotates();
            if rightmost || carry || double_step {
                will_advance[i] = true;
            }
        }
        for (i, advance) in will_advance.iter().enumerate() {
            if *advance {
                self.rotors[i].advance();
            }
        }
    }

    // ──────── Signal path ────────

    /// Converts the index `c`, after first advancing the machine.
    ///
    /// The signal passes through the plugboard, right to left through
    /// every rotor (the reflector last), back left to right through the
    /// non-reflector rotors, and through the plugboard again. A
    /// well-formed plugboard pairs symbols, so it is its own inverse and
    /// the forward map serves both ends.
    pub fn convert(&mut self, c: i32) -> i32 {
        self.advance_rotors();
        let mut curr = self.plugboard.permute(c);
        for rotor in self.rotors.iter().rev() {
            curr = rotor.convert_forward(curr);
        }
        for rotor in self.rotors.iter().skip(1) {
            curr = rotor.convert_backward(curr);
        }
        self.plugboard.permute(curr)
    }

    /// Converts the symbol `ch` through [`convert`](Self::convert).
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] if `ch` is not an alphabet
    /// symbol.
    pub fn convert_char(&mut self, ch: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_int(ch)? as i32;
        let out = self.convert(idx);
        self.alphabet.to_char(out as usize)
    }

    /// Converts every non-whitespace symbol of `msg`, advancing the
    /// machine once per symbol. Whitespace is dropped; regrouping the
    /// output into blocks is left to the caller.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NotInAlphabet`] at the first symbol outside
    /// the alphabet; the machine state reflects the symbols already
    /// converted.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, Machine, Permutation, Rotor};
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// let catalog = vec![
    ///     Rotor::reflector("R", Permutation::new("(AC) (BD)", alpha.clone()).unwrap()),
    ///     Rotor::moving("II", Permutation::new("(ABCD)", alpha.clone()).unwrap(), "C").unwrap(),
    ///     Rotor::moving("I", Permutation::new("(ABD)", alpha.clone()).unwrap(), "C").unwrap(),
    /// ];
    /// let mut machine = Machine::new(alpha, 3, 2).unwrap();
    /// machine.insert_rotors(&catalog, &["R", "II", "I"]).unwrap();
    /// machine.set_rotors("AA").unwrap();
    /// assert_eq!(machine.convert_message("A A").unwrap(), "DB");
    /// ```
    pub fn convert_message(&mut self, msg: &str) -> Result<String, EnigmaError> {
        let mut result = String::with_capacity(msg.len());
        for ch in msg.chars() {
            if ch.is_whitespace() {
                continue;
            }
            result.push(self.convert_char(ch)?);
        }
        Ok(result)
    }
}
