pub mod reorder_list;
