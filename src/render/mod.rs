//! Chart output: HTML for the screen, draw commands and PDF for print.
//!
//! Nothing here decides where a student sits or where a seat goes on the page;
//! the renderers only walk the seat matrix and the page geometry.

pub mod pdf;
pub mod print;
pub mod screen;
