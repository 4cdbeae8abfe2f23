pub mod layers;
pub mod references;
