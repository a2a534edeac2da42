//! Batch auction instance (problem) entities.

use {
    crate::{
        checks,
        error::{Error, Path},
        ids::{AmmId, OrderId, TokenId},
        reader::{Decode, Extra, Object, Reader, mismatch},
        serialize::JsonNumber,
    },
    indexmap::IndexMap,
    number::{BigInt, Decimal},
    serde::Serialize,
    serde_json::Value,
    serde_with::serde_as,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchAuction {
    pub tokens: IndexMap<TokenId, TokenInfo>,
    pub orders: IndexMap<OrderId, Order>,
    pub metadata: Metadata,
    pub amms: IndexMap<AmmId, Amm>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl BatchAuction {
    /// Checks the invariants spanning several entities.
    pub fn validate(&self) -> Result<(), Error> {
        checks::problem_references(self)
    }

    /// Sorts every map lexicographically by key. Parsed documents keep their
    /// insertion order; this gives programmatically built ones a
    /// deterministic serialization.
    pub fn sort_keys(&mut self) {
        self.tokens.sort_keys();
        self.orders.sort_keys();
        self.amms.sort_keys();
        for amm in self.amms.values_mut() {
            amm.parameters.sort_keys();
        }
    }
}

impl Decode for BatchAuction {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            tokens: object.field("tokens").required(reader)?,
            orders: object.field("orders").required(reader)?,
            metadata: object.field("metadata").required(reader)?,
            amms: object.field("amms").or_default(reader)?,
            extra: object.finish(reader),
        })
    }
}

/// Token-specific data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_price: Option<Decimal>,
    /// Priority for price vector normalization (larger is preferred).
    pub normalize_priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_buffer: Option<BigInt>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for TokenInfo {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            decimals: object.field("decimals").optional(reader)?,
            alias: object.field("alias").optional(reader)?,
            external_price: object.field("external_price").optional(reader)?,
            normalize_priority: object.field("normalize_priority").or_default(reader)?,
            internal_buffer: object.field("internal_buffer").optional(reader)?,
            extra: object.finish(reader),
        })
    }
}

/// Order/AMM cost and order fee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenAmount {
    pub amount: BigInt,
    pub token: TokenId,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for TokenAmount {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            amount: object.field("amount").required(reader)?,
            token: object.field("token").required(reader)?,
            extra: object.finish(reader),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Order {
    pub sell_token: TokenId,
    pub buy_token: TokenId,
    /// With `is_sell_order` the maximum amount to sell, otherwise the maximum
    /// amount to pay for `buy_amount`.
    pub sell_amount: BigInt,
    /// With `is_sell_order` the minimum amount to receive for `sell_amount`,
    /// otherwise the maximum amount to buy.
    pub buy_amount: BigInt,
    pub allow_partial_fill: bool,
    pub is_sell_order: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<TokenAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<TokenAmount>,
    /// Liquidity orders (from market makers) can't receive surplus.
    pub is_liquidity_order: bool,
    pub has_atomic_execution: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Order {
    /// Reads the order fields of `object`, leaving the rest to the caller.
    pub(crate) fn read(object: &mut Object<'_>, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let order = Self {
            sell_token: object.field("sell_token").required(reader)?,
            buy_token: object.field("buy_token").required(reader)?,
            sell_amount: object.field("sell_amount").required(reader)?,
            buy_amount: object.field("buy_amount").required(reader)?,
            allow_partial_fill: object.field("allow_partial_fill").required(reader)?,
            is_sell_order: object.field("is_sell_order").required(reader)?,
            fee: object.field("fee").optional(reader)?,
            cost: object.field("cost").optional(reader)?,
            is_liquidity_order: object.field("is_liquidity_order").or_default(reader)?,
            has_atomic_execution: object.field("has_atomic_execution").or_default(reader)?,
            extra: Extra::new(),
        };
        let path = object.path();
        checks::distinct_tokens(&order.sell_token, &order.buy_token, path)?;
        checks::positive(&order.sell_amount, &path.join("sell_amount"))?;
        checks::positive(&order.buy_amount, &path.join("buy_amount"))?;
        Ok(order)
    }
}

impl Decode for Order {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        let order = Self::read(&mut object, reader)?;
        Ok(Self {
            extra: object.finish(reader),
            ..order
        })
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantNames,
)]
pub enum AmmKind {
    ConstantProduct,
    WeightedProduct,
    Stable,
    Concentrated,
}

impl Decode for AmmKind {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        match value {
            Value::String(s) => s.parse().map_err(|_| Error::UnknownEnumVariant {
                path: path.clone(),
                value: s.clone(),
            }),
            other => Err(mismatch(path, "string", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Amm {
    #[serde(flatten)]
    pub parameters: AmmParameters,
    /// Trading fee, e.g. 0.003 for 0.3%.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<TokenAmount>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Amm {
    pub fn kind(&self) -> AmmKind {
        self.parameters.kind()
    }

    /// Reads the AMM fields of `object`, leaving the rest to the caller.
    pub(crate) fn read(object: &mut Object<'_>, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let kind = object.field("kind").required(reader)?;
        let reserves = object.field("reserves");
        let path = object.path().clone();
        Ok(Self {
            parameters: checks::reserves(kind, reserves, &path, reader)?,
            fee: object.field("fee").optional(reader)?,
            cost: object.field("cost").optional(reader)?,
            extra: Extra::new(),
        })
    }
}

impl Decode for Amm {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        let amm = Self::read(&mut object, reader)?;
        Ok(Self {
            extra: object.finish(reader),
            ..amm
        })
    }
}

/// Pool reserves, discriminated by the AMM kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum AmmParameters {
    ConstantProduct {
        reserves: IndexMap<TokenId, BigInt>,
    },
    WeightedProduct {
        reserves: IndexMap<TokenId, WeightedReserve>,
    },
    /// Reserves are kept verbatim; their shape isn't validated yet.
    Stable {
        #[serde(skip_serializing_if = "Option::is_none")]
        reserves: Option<Value>,
    },
    /// Reserves are kept verbatim; their shape isn't validated yet.
    Concentrated {
        #[serde(skip_serializing_if = "Option::is_none")]
        reserves: Option<Value>,
    },
}

impl AmmParameters {
    pub fn kind(&self) -> AmmKind {
        match self {
            Self::ConstantProduct { .. } => AmmKind::ConstantProduct,
            Self::WeightedProduct { .. } => AmmKind::WeightedProduct,
            Self::Stable { .. } => AmmKind::Stable,
            Self::Concentrated { .. } => AmmKind::Concentrated,
        }
    }

    /// The tokens held by the pool, if the reserves shape is known.
    pub fn tokens(&self) -> Option<Vec<&TokenId>> {
        match self {
            Self::ConstantProduct { reserves } => Some(reserves.keys().collect()),
            Self::WeightedProduct { reserves } => Some(reserves.keys().collect()),
            Self::Stable { .. } | Self::Concentrated { .. } => None,
        }
    }

    pub(crate) fn sort_keys(&mut self) {
        match self {
            Self::ConstantProduct { reserves } => reserves.sort_keys(),
            Self::WeightedProduct { reserves } => reserves.sort_keys(),
            Self::Stable { .. } | Self::Concentrated { .. } => (),
        }
    }
}

/// Token balance and weight of a weighted product pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeightedReserve {
    pub balance: BigInt,
    pub weight: Decimal,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for WeightedReserve {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            balance: object.field("balance").required(reader)?,
            weight: object.field("weight").required(reader)?,
            extra: object.finish(reader),
        })
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Runtime/blockchain environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Always a string; integer ids are accepted and converted.
    pub auction_id: String,
    /// Advisory, so it is written as a JSON number.
    #[serde_as(as = "JsonNumber")]
    pub gas_price: Decimal,
    /// Wrapped native token.
    pub native_token: TokenId,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for Metadata {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            environment: object.field("environment").optional(reader)?,
            auction_id: object.field("auction_id").required_with(auction_id)?,
            gas_price: object.field("gas_price").required(reader)?,
            native_token: object.field("native_token").required(reader)?,
            extra: object.finish(reader),
        })
    }
}

fn auction_id(value: &Value, path: &Path) -> Result<String, Error> {
    match value {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) if id.is_u64() || id.is_i64() => Ok(id.to_string()),
        other => Err(mismatch(path, "string or integer", other)),
    }
}
