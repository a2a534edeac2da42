//! Command line front end for checking and normalizing batch auction
//! documents.
mod cli;
mod run;

pub use self::{
    cli::{Args, Command, LimitArgs},
    run::{run, start},
};
