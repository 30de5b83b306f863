// Core modules implementing span location, splicing, and error modeling.
pub mod error;
pub mod locate;
pub mod mutate;
pub mod splice;
