mod temp_dir_stager;

pub use temp_dir_stager::TempDirStager;
