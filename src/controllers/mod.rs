pub mod metadata_list;
