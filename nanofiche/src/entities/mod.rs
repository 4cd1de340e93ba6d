mod bin;
mod envelope;
mod placement;
mod request;
mod reserve;
mod result;

#[doc(inline)]
pub use bin::BinDimensions;

#[doc(inline)]
pub use envelope::EnvelopeGeometry;

#[doc(inline)]
pub use envelope::EnvelopeShape;

#[doc(inline)]
pub use envelope::EnvelopeSpec;

#[doc(inline)]
pub use placement::Placement;

#[doc(inline)]
pub use request::PackRequest;

#[doc(inline)]
pub use reserve::ReservePosition;

#[doc(inline)]
pub use reserve::ReserveSpec;

#[doc(inline)]
pub use reserve::ResolvedReserve;

#[doc(inline)]
pub use result::PackingResult;

#[doc(inline)]
pub use result::SearchOutcome;
