/// Page to card composition.
pub mod card;
