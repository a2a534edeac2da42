//! Settled batch auction (solution) entities.
//!
//! Settled entities refine their problem counterparts by composition: the
//! problem entity is flattened into the settled one on the wire.

use {
    crate::{
        auction::{Amm, Order, TokenInfo},
        checks,
        error::{Error, Path},
        ids::{Address, AmmId, OrderId, TokenId},
        reader::{Decode, Extra, Object, Reader, mismatch},
        serialize::Hex,
    },
    indexmap::IndexMap,
    number::BigInt,
    serde::Serialize,
    serde_json::Value,
    serde_with::serde_as,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SettledBatchAuction {
    /// Token table of the solution itself. Solutions validated together with
    /// their auction use the auction's table instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<IndexMap<TokenId, TokenInfo>>,
    pub orders: IndexMap<OrderId, ExecutedOrder>,
    /// Settled price for each token.
    pub prices: IndexMap<TokenId, BigInt>,
    pub amms: IndexMap<AmmId, ExecutedAmm>,
    pub interaction_data: Vec<InteractionData>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SettledBatchAuction {
    /// Sorts every map lexicographically by key.
    pub fn sort_keys(&mut self) {
        if let Some(tokens) = &mut self.tokens {
            tokens.sort_keys();
        }
        self.orders.sort_keys();
        self.prices.sort_keys();
        self.amms.sort_keys();
        for amm in self.amms.values_mut() {
            amm.amm.parameters.sort_keys();
        }
    }

    /// All AMM executions in document order, with the path of each.
    pub fn executions(&self) -> impl Iterator<Item = (Path, &AmmId, &AmmExecution)> {
        self.amms.iter().flat_map(|(id, amm)| {
            amm.execution.iter().flatten().enumerate().map(move |(i, execution)| {
                let path = Path::root().join("amms").join(id).join("execution").join(i);
                (path, id, execution)
            })
        })
    }
}

impl Decode for SettledBatchAuction {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            tokens: object.field("tokens").optional(reader)?,
            orders: object.field("orders").required(reader)?,
            prices: object.field("prices").required(reader)?,
            amms: object.field("amms").required(reader)?,
            interaction_data: object.field("interaction_data").or_default(reader)?,
            extra: object.finish(reader),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub exec_buy_amount: BigInt,
    pub exec_sell_amount: BigInt,
}

impl Decode for ExecutedOrder {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        let order = Order::read(&mut object, reader)?;
        let exec_buy_amount = object.field("exec_buy_amount").required(reader)?;
        let exec_sell_amount = object.field("exec_sell_amount").required(reader)?;
        Ok(Self {
            order: Order {
                extra: object.finish(reader),
                ..order
            },
            exec_buy_amount,
            exec_sell_amount,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecutedAmm {
    #[serde(flatten)]
    pub amm: Amm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<Vec<AmmExecution>>,
}

impl Decode for ExecutedAmm {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        let amm = Amm::read(&mut object, reader)?;
        let execution = object.field("execution").optional(reader)?;
        Ok(Self {
            amm: Amm {
                extra: object.finish(reader),
                ..amm
            },
            execution,
        })
    }
}

/// AMM settlement information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AmmExecution {
    /// Token sold by the AMM.
    pub sell_token: TokenId,
    /// Token bought by the AMM.
    pub buy_token: TokenId,
    pub exec_sell_amount: BigInt,
    pub exec_buy_amount: BigInt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_plan: Option<ExecPlanCoords>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for AmmExecution {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        let execution = Self {
            sell_token: object.field("sell_token").required(reader)?,
            buy_token: object.field("buy_token").required(reader)?,
            exec_sell_amount: object.field("exec_sell_amount").required(reader)?,
            exec_buy_amount: object.field("exec_buy_amount").required(reader)?,
            exec_plan: object.field("exec_plan").optional(reader)?,
            extra: Extra::new(),
        };
        checks::distinct_tokens(&execution.sell_token, &execution.buy_token, path)?;
        Ok(Self {
            extra: object.finish(reader),
            ..execution
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExecPlanCoords {
    pub sequence: u32,
    /// Position within the sequence.
    pub position: u32,
    /// Whether internal liquidity is used.
    pub internal: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for ExecPlanCoords {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            sequence: object.field("sequence").required(reader)?,
            position: object.field("position").required(reader)?,
            internal: object.field("internal").or_default(reader)?,
            extra: object.finish(reader),
        })
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InteractionData {
    /// Contract to interact with.
    pub target: Address,
    /// Amount of native token sent along, e.g. for an ETH transfer.
    pub value: BigInt,
    #[serde_as(as = "Hex")]
    pub call_data: Vec<u8>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Decode for InteractionData {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let mut object = Object::new(value, path)?;
        Ok(Self {
            target: object.field("target").required(reader)?,
            value: object.field("value").required(reader)?,
            call_data: object.field("call_data").required_with(call_data)?,
            extra: object.finish(reader),
        })
    }
}

fn call_data(value: &Value, path: &Path) -> Result<Vec<u8>, Error> {
    let Value::String(s) = value else {
        return Err(mismatch(path, "0x-prefixed hex string", value));
    };
    let invalid = || Error::InvalidValue {
        path: path.clone(),
        reason: "call data must be 0x-prefixed hex",
    };
    let digits = s.strip_prefix("0x").ok_or_else(invalid)?;
    const_hex::decode(digits).map_err(|_| invalid())
}
