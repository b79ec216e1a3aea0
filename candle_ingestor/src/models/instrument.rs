use indexmap::IndexMap;

/// A tradeable symbol as reported by the account's instrument listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    /// Symbol identifier, e.g. `"EUR_USD"`.
    pub name: String,
    /// Human-readable name, e.g. `"EUR/USD"`.
    pub display_name: String,
    /// Upstream instrument class, e.g. `"CURRENCY"`.
    pub instrument_type: String,
}

/// The known-instrument set, populated once per run and read-only thereafter.
///
/// Preserves the upstream listing order. Fetch and collect operations reject
/// instruments that are not members.
#[derive(Debug, Clone, Default)]
pub struct InstrumentDirectory {
    instruments: IndexMap<String, Instrument>,
}

impl InstrumentDirectory {
    pub fn new(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        Self {
            instruments: instruments
                .into_iter()
                .map(|i| (i.name.clone(), i))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instruments.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Instrument> {
        self.instruments.get(name)
    }

    /// Instrument names in upstream listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instruments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
