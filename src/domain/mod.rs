// Domain layer - media files, chapters and concatenation jobs

pub mod model;
