pub mod radial_field;
