//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// A symbol appears more than once in an alphabet or in the cycles
    /// of a permutation.
    #[error("duplicate symbol in alphabet or cycles")]
    DuplicateSymbol,
    /// A symbol or index lookup has no entry in the alphabet.
    #[error("symbol or index is not in the alphabet")]
    NotInAlphabet,
    /// A position or ring setting string does not have one symbol per
    /// settable rotor.
    #[error("setting length does not match the number of settable rotors")]
    BadLength,
    /// The requested rotor arrangement violates the machine's geometry.
    #[error("invalid rotor arrangement for this machine")]
    BadAssembly,
    /// A requested rotor name has no catalog match, or rotor slots remain
    /// unfilled after assembly.
    #[error("a requested rotor is missing from the catalog")]
    MissingRotor,
    /// The same rotor name was requested twice in one assembly.
    #[error("the same rotor was selected more than once")]
    DuplicateRotorName,
}
