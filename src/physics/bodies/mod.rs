pub mod body_set;
