//! Venue record and its form input.

use crate::model::genre::Genre;
use crate::model::validation::{
    normalize_optional, require_text, validate_link, validate_phone, validate_seeking,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// Database-assigned venue identifier.
pub type VenueId = i64;

/// A physical location that can host shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Shaped venue form values used by create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    /// Trims text fields and blanks out optional values.
    ///
    /// The seeking description is dropped when `seeking_talent` is clear.
    pub fn normalized(self) -> Self {
        let seeking_description = if self.seeking_talent {
            normalize_optional(self.seeking_description)
        } else {
            None
        };
        Self {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: normalize_optional(self.phone),
            genres: self.genres,
            facebook_link: normalize_optional(self.facebook_link),
            image_link: normalize_optional(self.image_link),
            website_link: normalize_optional(self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description,
        }
    }

    /// Checks field rules. Expects a [`VenueInput::normalized`] value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("city", &self.city)?;
        require_text("state", &self.state)?;
        require_text("address", &self.address)?;
        validate_phone(self.phone.as_deref())?;
        validate_link("facebook_link", self.facebook_link.as_deref())?;
        validate_link("image_link", self.image_link.as_deref())?;
        validate_link("website_link", self.website_link.as_deref())?;
        validate_seeking(self.seeking_talent, self.seeking_description.as_deref())
    }

    /// Materializes the persisted record once an id is known.
    pub fn into_venue(self, id: VenueId) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website_link: self.website_link,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

impl From<Venue> for VenueInput {
    fn from(venue: Venue) -> Self {
        Self {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            genres: venue.genres,
            facebook_link: venue.facebook_link,
            image_link: venue.image_link,
            website_link: venue.website_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
        }
    }
}
