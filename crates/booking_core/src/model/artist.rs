//! Artist record and its form input.

use crate::model::genre::Genre;
use crate::model::validation::{
    normalize_optional, require_text, validate_link, validate_phone, validate_seeking,
    ValidationError,
};
use serde::{Deserialize, Serialize};

/// Database-assigned artist identifier.
pub type ArtistId = i64;

/// A performer who can be booked into shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Shaped artist form values used by create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    /// Same normalization rules as venues, keyed on `seeking_venue`.
    pub fn normalized(self) -> Self {
        let seeking_description = if self.seeking_venue {
            normalize_optional(self.seeking_description)
        } else {
            None
        };
        Self {
            name: self.name.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            phone: normalize_optional(self.phone),
            genres: self.genres,
            facebook_link: normalize_optional(self.facebook_link),
            image_link: normalize_optional(self.image_link),
            website_link: normalize_optional(self.website_link),
            seeking_venue: self.seeking_venue,
            seeking_description,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("city", &self.city)?;
        require_text("state", &self.state)?;
        validate_phone(self.phone.as_deref())?;
        validate_link("facebook_link", self.facebook_link.as_deref())?;
        validate_link("image_link", self.image_link.as_deref())?;
        validate_link("website_link", self.website_link.as_deref())?;
        validate_seeking(self.seeking_venue, self.seeking_description.as_deref())
    }

    pub fn into_artist(self, id: ArtistId) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: self.genres,
            facebook_link: self.facebook_link,
            image_link: self.image_link,
            website_link: self.website_link,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

impl From<Artist> for ArtistInput {
    fn from(artist: Artist) -> Self {
        Self {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            genres: artist.genres,
            facebook_link: artist.facebook_link,
            image_link: artist.image_link,
            website_link: artist.website_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
        }
    }
}
