//! Rotor cipher machine simulator.
//!
//! Simulates an electromechanical rotor cipher machine of the Enigma
//! family: each symbol is routed through a plugboard, a bank of wired
//! rotors and a reflector, and back out, while a pawl mechanism advances
//! a subset of the rotors between symbols, including the historically
//! faithful "double-stepping" anomaly.
//!
//! The alphabet is an arbitrary ordered set of distinct symbols, so the
//! same machinery drives four-symbol test fixtures and the historical
//! 26-letter machines alike.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index mapping over an arbitrary symbol set)
//!     ↑ indexes
//! Permutation  (cycle-notation bijection with forward/inverse tables)
//!     ↑ wired into
//! Rotor        (permutation + rotational position + ring offset;
//!               fixed, moving or reflecting)
//!     ↑ slotted into
//! Machine      (plugboard + rotor bank + reflector + stepping pawls)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with a small four-symbol machine:
//!
//! ```
//! use enigma::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alpha = Alphabet::new("ABCD").unwrap();
//! let catalog = vec![
//!     Rotor::reflector("R", Permutation::new("(AC) (BD)", alpha.clone()).unwrap()),
//!     Rotor::moving("II", Permutation::new("(ABCD)", alpha.clone()).unwrap(), "C").unwrap(),
//!     Rotor::moving("I", Permutation::new("(ABD)", alpha.clone()).unwrap(), "C").unwrap(),
//! ];
//!
//! let mut machine = Machine::new(alpha.clone(), 3, 2).unwrap();
//! machine.insert_rotors(&catalog, &["R", "II", "I"]).unwrap();
//! machine.set_rotors("AA").unwrap();
//! assert_eq!(machine.convert_message("AA").unwrap(), "DB");
//!
//! // The machine is self-reciprocal: the same settings decrypt.
//! let mut machine = Machine::new(alpha, 3, 2).unwrap();
//! machine.insert_rotors(&catalog, &["R", "II", "I"]).unwrap();
//! machine.set_rotors("AA").unwrap();
//! assert_eq!(machine.convert_message("DB").unwrap(), "AA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;

pub use alphabet::Alphabet;
pub use config::{MachineConfig, Setup};
pub use error::EnigmaError;
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
