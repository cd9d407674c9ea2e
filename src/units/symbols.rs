//! units::symbols — static unit tables and symbol resolution.
//!
//! Purpose
//! -------
//! Hold the fixed data the quantity parser resolves against: the
//! Unicode→ASCII substitution table, the SI prefix table, the unit symbol
//! table (scale factor to the coherent SI unit plus a dimension-exponent
//! vector), and the signature table mapping dimension exponents to physical
//! type names.
//!
//! Conventions
//! -----------
//! - Dimension exponents are ordered `[length, mass, time, current,
//!   temperature, amount of substance, luminous intensity]`.
//! - Scales are relative to the coherent SI unit for the entry's dimension
//!   vector (`g` is `1e-3` of `kg`, `Angstrom` is `1e-10` of `m`).
//! - Resolution tries an exact symbol match before any prefix split, so
//!   tabled symbols shadow prefix interpretations (`T` is tesla; `THz`
//!   still resolves as tera-hertz).
//! - Temperature-scale symbols (`deg_C`, `deg_F`) are treated as scale
//!   units of kelvin; affine zero-point offsets are out of scope.

/// One entry in the unit symbol table.
#[derive(Debug, Clone, Copy)]
pub struct UnitDef {
    pub symbol: &'static str,
    /// Multiplier to the coherent SI unit of `dims`.
    pub scale: f64,
    /// SI dimension exponents `[L, M, T, I, Θ, N, J]`.
    pub dims: [i8; 7],
    /// Whether an SI prefix may be attached to this symbol.
    pub prefixable: bool,
}

/// A resolved unit symbol: combined prefix·symbol scale and dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSymbol {
    pub scale: f64,
    pub dims: [i8; 7],
}

/// Unicode→ASCII substitutions applied before tokenization, in order.
///
/// Composed forms come first so `°C` cannot decay to `degC` through the
/// bare `°` rule. Both the micro sign (U+00B5) and Greek mu (U+03BC) map to
/// `u`; `ℏ` maps to the named symbol `hbar` so the substituted string stays
/// inside the multiplicative token grammar.
pub const UNICODE_SUBSTITUTIONS: [(&str, &str); 8] = [
    ("°C", "deg_C"),
    ("°F", "deg_F"),
    ("°", "deg"),
    ("µ", "u"),
    ("μ", "u"),
    ("Å", "Angstrom"),
    ("Ω", "Ohm"),
    ("ℏ", "hbar"),
];

/// SI prefixes, longest spelling first so `da` wins over `d` + rest.
const SI_PREFIXES: [(&str, f64); 20] = [
    ("da", 1e1),
    ("y", 1e-24),
    ("z", 1e-21),
    ("a", 1e-18),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("c", 1e-2),
    ("d", 1e-1),
    ("h", 1e2),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
    ("Z", 1e21),
    ("Y", 1e24),
];

const UNIT_TABLE: [UnitDef; 36] = [
    // ---- SI base ----
    UnitDef { symbol: "m", scale: 1.0, dims: [1, 0, 0, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "g", scale: 1e-3, dims: [0, 1, 0, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "s", scale: 1.0, dims: [0, 0, 1, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "A", scale: 1.0, dims: [0, 0, 0, 1, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "K", scale: 1.0, dims: [0, 0, 0, 0, 1, 0, 0], prefixable: true },
    UnitDef { symbol: "mol", scale: 1.0, dims: [0, 0, 0, 0, 0, 1, 0], prefixable: true },
    UnitDef { symbol: "cd", scale: 1.0, dims: [0, 0, 0, 0, 0, 0, 1], prefixable: true },
    // ---- SI derived ----
    UnitDef { symbol: "Hz", scale: 1.0, dims: [0, 0, -1, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "N", scale: 1.0, dims: [1, 1, -2, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "Pa", scale: 1.0, dims: [-1, 1, -2, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "J", scale: 1.0, dims: [2, 1, -2, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "W", scale: 1.0, dims: [2, 1, -3, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "C", scale: 1.0, dims: [0, 0, 1, 1, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "V", scale: 1.0, dims: [2, 1, -3, -1, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "F", scale: 1.0, dims: [-2, -1, 4, 2, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "Ohm", scale: 1.0, dims: [2, 1, -3, -2, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "S", scale: 1.0, dims: [-2, -1, 3, 2, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "Wb", scale: 1.0, dims: [2, 1, -2, -1, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "T", scale: 1.0, dims: [0, 1, -2, -1, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "H", scale: 1.0, dims: [2, 1, -2, -2, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "lm", scale: 1.0, dims: [0, 0, 0, 0, 0, 0, 1], prefixable: true },
    UnitDef { symbol: "lx", scale: 1.0, dims: [-2, 0, 0, 0, 0, 0, 1], prefixable: true },
    UnitDef { symbol: "L", scale: 1e-3, dims: [3, 0, 0, 0, 0, 0, 0], prefixable: true },
    UnitDef { symbol: "eV", scale: 1.602176634e-19, dims: [2, 1, -2, 0, 0, 0, 0], prefixable: true },
    // ---- Accepted non-SI ----
    UnitDef { symbol: "Angstrom", scale: 1e-10, dims: [1, 0, 0, 0, 0, 0, 0], prefixable: false },
    UnitDef { symbol: "ppm", scale: 1e-6, dims: [0, 0, 0, 0, 0, 0, 0], prefixable: false },
    UnitDef { symbol: "rad", scale: 1.0, dims: [0, 0, 0, 0, 0, 0, 0], prefixable: false },
    UnitDef { symbol: "sr", scale: 1.0, dims: [0, 0, 0, 0, 0, 0, 0], prefixable: false },
    UnitDef {
        symbol: "deg",
        scale: std::f64::consts::PI / 180.0,
        dims: [0, 0, 0, 0, 0, 0, 0],
        prefixable: false,
    },
    UnitDef { symbol: "deg_C", scale: 1.0, dims: [0, 0, 0, 0, 1, 0, 0], prefixable: false },
    UnitDef { symbol: "deg_F", scale: 5.0 / 9.0, dims: [0, 0, 0, 0, 1, 0, 0], prefixable: false },
    UnitDef { symbol: "min", scale: 60.0, dims: [0, 0, 1, 0, 0, 0, 0], prefixable: false },
    UnitDef { symbol: "h", scale: 3600.0, dims: [0, 0, 1, 0, 0, 0, 0], prefixable: false },
    UnitDef { symbol: "d", scale: 86400.0, dims: [0, 0, 1, 0, 0, 0, 0], prefixable: false },
    UnitDef {
        symbol: "hbar",
        scale: 1.054571817e-34,
        dims: [2, 1, -1, 0, 0, 0, 0],
        prefixable: false,
    },
    UnitDef { symbol: "bar", scale: 1e5, dims: [-1, 1, -2, 0, 0, 0, 0], prefixable: true },
];

/// Dimension-exponent signatures of the physical types this crate names.
/// Anything else reports as "unknown".
const PHYSICAL_TYPES: [([i8; 7], &str); 27] = [
    ([0, 0, 0, 0, 0, 0, 0], "dimensionless"),
    ([1, 0, 0, 0, 0, 0, 0], "length"),
    ([0, 1, 0, 0, 0, 0, 0], "mass"),
    ([0, 0, 1, 0, 0, 0, 0], "time"),
    ([0, 0, 0, 1, 0, 0, 0], "current"),
    ([0, 0, 0, 0, 1, 0, 0], "temperature"),
    ([0, 0, 0, 0, 0, 1, 0], "amount of substance"),
    ([0, 0, 0, 0, 0, 0, 1], "luminous intensity"),
    ([2, 0, 0, 0, 0, 0, 0], "area"),
    ([3, 0, 0, 0, 0, 0, 0], "volume"),
    ([0, 0, -1, 0, 0, 0, 0], "frequency"),
    ([-1, 0, 0, 0, 0, 0, 0], "wavenumber"),
    ([1, 0, -1, 0, 0, 0, 0], "speed"),
    ([1, 0, -2, 0, 0, 0, 0], "acceleration"),
    ([1, 1, -2, 0, 0, 0, 0], "force"),
    ([2, 1, -2, 0, 0, 0, 0], "energy"),
    ([2, 1, -3, 0, 0, 0, 0], "power"),
    ([-1, 1, -2, 0, 0, 0, 0], "pressure"),
    ([2, 1, -1, 0, 0, 0, 0], "angular momentum"),
    ([0, 0, 1, 1, 0, 0, 0], "electrical charge"),
    ([2, 1, -3, -1, 0, 0, 0], "electrical potential"),
    ([2, 1, -3, -2, 0, 0, 0], "electrical resistance"),
    ([-2, -1, 3, 2, 0, 0, 0], "electrical conductance"),
    ([-2, -1, 4, 2, 0, 0, 0], "capacitance"),
    ([2, 1, -2, -2, 0, 0, 0], "inductance"),
    ([2, 1, -2, -1, 0, 0, 0], "magnetic flux"),
    ([0, 1, -2, -1, 0, 0, 0], "magnetic flux density"),
];

/// Apply the fixed Unicode→ASCII substitutions to a quantity string.
pub fn substitute(input: &str) -> String {
    let mut out = input.to_string();
    for (from, to) in UNICODE_SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

fn find_exact(symbol: &str) -> Option<&'static UnitDef> {
    UNIT_TABLE.iter().find(|def| def.symbol == symbol)
}

/// Resolve a unit symbol to its scale and dimension exponents.
///
/// Tries an exact table match first, then a single SI prefix followed by a
/// prefixable table symbol. Returns `None` when neither applies.
pub fn resolve_symbol(symbol: &str) -> Option<ResolvedSymbol> {
    if let Some(def) = find_exact(symbol) {
        return Some(ResolvedSymbol { scale: def.scale, dims: def.dims });
    }
    for (prefix, factor) in SI_PREFIXES {
        if let Some(rest) = symbol.strip_prefix(prefix) {
            if rest.is_empty() {
                continue;
            }
            if let Some(def) = find_exact(rest) {
                if def.prefixable {
                    return Some(ResolvedSymbol { scale: factor * def.scale, dims: def.dims });
                }
            }
        }
    }
    None
}

/// Name the physical type of an integer dimension-exponent vector.
pub fn physical_type_of(dims: [i8; 7]) -> &'static str {
    PHYSICAL_TYPES
        .iter()
        .find(|(signature, _)| *signature == dims)
        .map(|(_, name)| *name)
        .unwrap_or("unknown")
}
