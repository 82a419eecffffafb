//! UI module - widgets shared by the profile screens

pub mod components;
