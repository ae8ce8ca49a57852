pub mod quality;
pub mod trial;
