//! Core custody functionality
//!
//! This module contains the core custody functionality: cryptography,
//! key custody, transfer signing, and the persistence seam.

pub mod crypto;
pub mod custody;
pub mod signing;
pub mod store;
