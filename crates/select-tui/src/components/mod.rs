pub mod select_list;
