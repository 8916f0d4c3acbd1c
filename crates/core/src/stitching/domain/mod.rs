pub mod stitcher;
