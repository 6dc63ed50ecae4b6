pub mod delete_property;
pub mod replace_image;
