use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pharmastock_core::{DomainError, Sku, ValueObject};
use pharmastock_products::Catalog;

/// Storage/wire format of movement timestamps (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of a stock movement.
///
/// Stored and exchanged as the literals `Entrada` / `Salida`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovementKind {
    #[serde(rename = "Entrada")]
    Inward,
    #[serde(rename = "Salida")]
    Outward,
}

impl MovementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Inward => "Entrada",
            MovementKind::Outward => "Salida",
        }
    }
}

impl ValueObject for MovementKind {}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementKind {
    type Err = DomainError;

    /// Accepts the stored literals exactly, plus `inward` / `outward` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Entrada" => Ok(MovementKind::Inward),
            "Salida" => Ok(MovementKind::Outward),
            other if other.eq_ignore_ascii_case("inward") => Ok(MovementKind::Inward),
            other if other.eq_ignore_ascii_case("outward") => Ok(MovementKind::Outward),
            other => Err(DomainError::validation(format!(
                "movement kind must be Entrada or Salida (got {other:?})"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for MovementKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Largest quantity accepted, in either direction (2^53 - 1).
///
/// Every value up to this bound round-trips exactly through a JSON number.
pub const MAX_QUANTITY: i64 = (1 << 53) - 1;

/// Number of units moved.
///
/// Recorded quantities are strictly positive. Rows loaded from legacy files
/// may carry zero or a negative amount (see [`Quantity::from_stored`]); the
/// magnitude never exceeds [`MAX_QUANTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(i64);

fn invalid_quantity(got: impl core::fmt::Debug) -> DomainError {
    DomainError::validation(format!(
        "quantity must be a positive whole number no larger than {MAX_QUANTITY} (got {got:?})"
    ))
}

/// Integral value of a float, when it is finite, whole and within bounds.
fn whole_units(units: f64) -> Option<i64> {
    let in_range = units.is_finite() && units.abs() <= MAX_QUANTITY as f64;
    (in_range && units.fract() == 0.0).then_some(units as i64)
}

/// Integral value of stored or submitted text: `10` or `10.0`.
fn whole_units_from_text(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(units) => (units.unsigned_abs() <= MAX_QUANTITY as u64).then_some(units),
        Err(_) => raw.parse::<f64>().ok().and_then(whole_units),
    }
}

impl Quantity {
    pub fn new(units: i64) -> Result<Self, DomainError> {
        if !(1..=MAX_QUANTITY).contains(&units) {
            return Err(invalid_quantity(units));
        }
        Ok(Self(units))
    }

    /// Accept a float only when it is a finite, integral, positive amount.
    ///
    /// Form widgets and spreadsheets hand over `10.0` for ten units.
    pub fn from_f64(units: f64) -> Result<Self, DomainError> {
        whole_units(units).map_or_else(|| Err(invalid_quantity(units)), Self::new)
    }

    /// Parse submitted text: `10` or `10.0`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        whole_units_from_text(raw).map_or_else(|| Err(invalid_quantity(raw)), Self::new)
    }

    /// Parse a quantity read back from a ledger file.
    ///
    /// The spreadsheet tool that wrote older files never validated the amount,
    /// so zero and negative whole numbers load as they are and count in the
    /// stock sum with their sign. Fractions and amounts beyond
    /// [`MAX_QUANTITY`] are still refused: the ledger counts whole units.
    pub fn from_stored(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        whole_units_from_text(raw).map(Self).ok_or_else(|| {
            DomainError::validation(format!(
                "stored quantity must be a whole number within ±{MAX_QUANTITY} (got {raw:?})"
            ))
        })
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One ledger entry. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: NaiveDateTime,
    kind: MovementKind,
    sku: Sku,
    quantity: Quantity,
    notes: String,
}

fn serialize_timestamp<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

impl Movement {
    pub fn new(
        timestamp: NaiveDateTime,
        kind: MovementKind,
        sku: Sku,
        quantity: Quantity,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            kind,
            sku,
            quantity,
            notes: notes.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Contribution of this entry to its SKU's stock.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::Inward => self.quantity.get(),
            MovementKind::Outward => -self.quantity.get(),
        }
    }
}

/// Command: RecordMovement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMovement {
    pub kind: MovementKind,
    pub sku: Sku,
    pub quantity: Quantity,
    pub notes: String,
    pub occurred_at: NaiveDateTime,
}

/// The append-only movement collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    movements: Vec<Movement>,
}

impl Ledger {
    pub fn new(movements: Vec<Movement>) -> Self {
        Self { movements }
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Append a movement for a SKU the catalog knows about.
    ///
    /// Referential integrity (SKU must exist) is the only cross-collection
    /// check. Stock is allowed to go negative, but every new entry moves a
    /// positive number of units.
    pub fn record(&mut self, catalog: &Catalog, cmd: RecordMovement) -> Result<&Movement, DomainError> {
        if !cmd.quantity.is_positive() {
            return Err(invalid_quantity(cmd.quantity.get()));
        }
        if !catalog.contains(&cmd.sku) {
            return Err(DomainError::not_found(format!(
                "SKU {} not found; add the product first",
                cmd.sku
            )));
        }

        self.movements.push(Movement::new(
            cmd.occurred_at,
            cmd.kind,
            cmd.sku,
            cmd.quantity,
            cmd.notes,
        ));
        Ok(&self.movements[self.movements.len() - 1])
    }
}
