pub mod college;
