mod movie;

pub use movie::{Genre, Movie, MoviePatch, NewMovie};
