//! Core data types for the Feegrid billing system

pub mod fee;
