pub mod weight_entry_mapper;
