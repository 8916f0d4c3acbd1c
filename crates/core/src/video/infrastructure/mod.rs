pub mod ffmpeg_sampler;
pub mod image_file_reader;
pub mod image_file_writer;
