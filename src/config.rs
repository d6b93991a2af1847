//! Validated machine configuration and per-message setup.
//!
//! Whatever external format describes a machine (command line, config
//! file, test fixture) is parsed elsewhere; this module defines the
//! already-validated shapes the core accepts and the order in which a
//! setup is applied to a freshly assembled machine.

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A machine description: the alphabet, the slot geometry, and a catalog
/// of named rotor templates.
///
/// The catalog is read-only; every [`assemble`](Self::assemble) call
/// clones the templates it selects, so one config can serve any number of
/// machines without sharing mutable rotor state.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Common alphabet of all rotors.
    pub alphabet: Alphabet,
    /// Number of rotor slots, including the reflector slot.
    pub num_rotors: usize,
    /// Number of pawls; at most this many rotating rotors may be used.
    pub pawls: usize,
    /// Available rotor templates, looked up by name.
    pub catalog: Vec<Rotor>,
}

/// Per-message settings: which rotors to use and how to align them.
#[derive(Debug, Clone)]
pub struct Setup {
    /// Rotor names, one per slot; the first names the reflector.
    pub rotors: Vec<String>,
    /// Initial positions for the non-reflector slots, left to right.
    pub positions: String,
    /// Optional ring offsets, same shape as `positions`.
    pub rings: Option<String>,
    /// Optional plugboard wiring in cycle notation.
    pub plugboard: Option<String>,
}

impl Setup {
    /// Creates a setup with no ring offsets and no plugboard.
    pub fn new(rotors: &[&str], positions: &str) -> Setup {
        Setup {
            rotors: rotors.iter().map(|n| n.to_string()).collect(),
            positions: positions.to_string(),
            rings: None,
            plugboard: None,
        }
    }

    /// Adds ring offsets.
    pub fn with_rings(mut self, rings: &str) -> Setup {
        self.rings = Some(rings.to_string());
        self
    }

    /// Adds plugboard wiring.
    pub fn with_plugboard(mut self, cycles: &str) -> Setup {
        self.plugboard = Some(cycles.to_string());
        self
    }
}

impl MachineConfig {
    /// Builds a machine and applies `setup` to it: rotor insertion, ring
    /// offsets (when given), positions, then the plugboard (when given).
    ///
    /// # Errors
    /// Propagates the assembly and setting errors of [`Machine`]: bad
    /// geometry or arrangement, missing or duplicated rotor names, wrong
    /// setting lengths, and symbols outside the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Alphabet, MachineConfig, Permutation, Rotor, Setup};
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// let config = MachineConfig {
    ///     alphabet: alpha.clone(),
    ///     num_rotors: 3,
    ///     pawls: 2,
    ///     catalog: vec![
    ///         Rotor::reflector("R", Permutation::new("(AC) (BD)", alpha.clone()).unwrap()),
    ///         Rotor::moving("II", Permutation::new("(ABCD)", alpha.clone()).unwrap(), "C").unwrap(),
    ///         Rotor::moving("I", Permutation::new("(ABD)", alpha).unwrap(), "C").unwrap(),
    ///     ],
    /// };
    /// let mut machine = config.assemble(&Setup::new(&["R", "II", "I"], "AA")).unwrap();
    /// assert_eq!(machine.convert_message("AA").unwrap(), "DB");
    /// ```
    pub fn assemble(&self, setup: &Setup) -> Result<Machine, EnigmaError> {
        let mut machine = Machine::new(self.alphabet.clone(), self.num_rotors, self.pawls)?;
        let names: Vec<&str> = setup.rotors.iter().map(String::as_str).collect();
        machine.insert_rotors(&self.catalog, &names)?;
        if let Some(rings) = &setup.rings {
            machine.set_ring(rings)?;
        }
        machine.set_rotors(&setup.positions)?;
        if let Some(cycles) = &setup.plugboard {
            machine.set_plugboard(Permutation::new(cycles, self.alphabet.clone())?);
        }
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> MachineConfig {
        let alpha = Alphabet::new("ABCD").unwrap();
        MachineConfig {
            alphabet: alpha.clone(),
            num_rotors: 3,
            pawls: 2,
            catalog: vec![
                Rotor::reflector(
                    "R",
                    Permutation::new("(AC) (BD)", alpha.clone()).unwrap(),
                ),
                Rotor::moving(
                    "TWO",
                    Permutation::new("(ABCD)", alpha.clone()).unwrap(),
                    "C",
                )
                .unwrap(),
                Rotor::moving("ONE", Permutation::new("(ABD)", alpha).unwrap(), "C").unwrap(),
            ],
        }
    }

    #[test]
    fn test_assemble_minimal_setup() {
        let config = small_config();
        let mut machine = config
            .assemble(&Setup::new(&["R", "TWO", "ONE"], "AA"))
            .unwrap();
        assert_eq!(machine.num_rotors(), 3);
        assert_eq!(machine.positions(), "AA");
        assert!(machine.plugboard().is_derangement());
        assert_eq!(machine.convert_message("AA").unwrap(), "DB");
    }

    #[test]
    fn test_assemble_with_rings_and_plugboard() {
        let config = small_config();
        let setup = Setup::new(&["R", "TWO", "ONE"], "BC")
            .with_rings("BB")
            .with_plugboard("(AD)");
        let mut machine = config.assemble(&setup).unwrap();
        assert_eq!(machine.positions(), "BC");
        assert_eq!(machine.rotors()[1].ring(), 1);
        assert!(!machine.plugboard().is_derangement());

        // The same setup decrypts what it encrypted.
        let ciphertext = machine.convert_message("DCBA").unwrap();
        let mut machine = config.assemble(&setup).unwrap();
        assert_eq!(machine.convert_message(&ciphertext).unwrap(), "DCBA");
    }

    #[test]
    fn test_assemble_propagates_errors() {
        let config = small_config();
        assert_eq!(
            config
                .assemble(&Setup::new(&["ONE", "TWO", "R"], "AA"))
                .err(),
            Some(EnigmaError::BadAssembly)
        );
        assert_eq!(
            config
                .assemble(&Setup::new(&["R", "TWO", "SIX"], "AA"))
                .err(),
            Some(EnigmaError::MissingRotor)
        );
        assert_eq!(
            config.assemble(&Setup::new(&["R", "TWO", "ONE"], "A")).err(),
            Some(EnigmaError::BadLength)
        );
        assert_eq!(
            config
                .assemble(&Setup::new(&["R", "TWO", "ONE"], "AA").with_plugboard("(AB)(BC)"))
                .err(),
            Some(EnigmaError::DuplicateSymbol)
        );
    }

    #[test]
    fn test_config_outlives_assembled_machines() {
        let config = small_config();
        {
            let mut machine = config
                .assemble(&Setup::new(&["R", "TWO", "ONE"], "CC"))
                .unwrap();
            machine.convert(0);
        }
        // Template positions are untouched by the machine's stepping.
        assert_eq!(config.catalog[2].setting(), 0);
    }
}
