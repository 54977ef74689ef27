pub mod binary;
pub mod lammps;
pub mod npz;
