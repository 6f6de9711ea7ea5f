pub mod a001_program;
pub mod a002_rdap;
