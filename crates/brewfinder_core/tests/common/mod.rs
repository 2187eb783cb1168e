#![allow(dead_code)]

use brewfinder_core::{Brewery, BreweryFields};

pub const HASH: &str = "4e1243bd22c66e76c2ba9eddc1f91394e57f9f83a0a1b6c5d4e3f2a1b0c9d8e74e1243bd22c66e76c2ba9eddc1f91394e57f9f83a0a1b6c5d4e3f2a1b0c9d8e7";
pub const SALT: &str = "a3f5c7e9b1d3f5a7c9e1b3d5f7a9c1e3a3f5c7e9b1d3f5a7c9e1b3d5f7a9c1e3";
pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";

/// A fully valid field set; tests override what they exercise.
pub fn fields(name: &str, city: &str) -> BreweryFields {
    BreweryFields {
        profile_id: Some(7),
        activation_token: None,
        address1: "1 Mill Street".to_string(),
        address2: "Suite 4".to_string(),
        city: city.to_string(),
        content: "Small-batch ales brewed on the river.".to_string(),
        email: "taps@example.com".to_string(),
        hash: HASH.to_string(),
        image_id: None,
        location_x: -106.65,
        location_y: 35.08,
        name: name.to_string(),
        phone: "505-555-0100".to_string(),
        salt: SALT.to_string(),
        state: "NM".to_string(),
        zip: 87102,
    }
}

pub fn brewery(name: &str, city: &str) -> Brewery {
    Brewery::new(fields(name, city)).unwrap()
}
