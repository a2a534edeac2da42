//! Static descriptions of the interchange entities and their rendering as an
//! OpenAPI 3 component document.
//!
//! The descriptors are the source of truth for the generated documentation.
//! Their order is the order of the emitted document, so regenerating it
//! produces stable diffs.

mod example;

pub use self::example::{example_instance, example_solution};
use {
    crate::auction::AmmKind,
    serde_json::{Map, Value, json},
    strum::VariantNames,
};

/// An entity (object type) of the interchange format.
#[derive(Debug)]
pub struct Entity {
    pub name: &'static str,
    pub description: &'static str,
    /// Entity this one refines. Its fields are inherited and not repeated.
    pub extends: Option<&'static str>,
    pub fields: &'static [Field],
    pub example: Example,
}

impl Entity {
    pub fn example(&self) -> Value {
        self.example.resolve()
    }

    pub fn required(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name)
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub ty: Type,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

impl Field {
    /// Enumeration members of the field's type, if it is an enumeration.
    pub fn members(&self) -> Option<&'static [&'static str]> {
        self.ty.members()
    }
}

/// Semantic field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Type {
    Boolean,
    String,
    /// Integer between 0 and 255.
    Uint8,
    /// Integer between 0 and 2^32 - 1.
    Uint32,
    Int64,
    TokenId,
    OrderId,
    AmmId,
    Address,
    BigInt,
    Decimal,
    /// A decimal written as a JSON number.
    Number,
    /// A string or an integer, normalized to a string.
    AuctionId,
    AmmKind,
    /// `0x`-prefixed hex encoded bytes.
    Bytes,
    /// Reserves of an AMM, shaped according to its kind.
    Reserves,
    Entity(&'static str),
    Map(&'static Type, &'static Type),
    List(&'static Type),
}

impl Type {
    pub fn name(&self) -> String {
        match self {
            Self::Boolean => "boolean".to_owned(),
            Self::String => "string".to_owned(),
            Self::Uint8 => "uint8".to_owned(),
            Self::Uint32 => "uint32".to_owned(),
            Self::Int64 => "int64".to_owned(),
            Self::TokenId => "TokenId".to_owned(),
            Self::OrderId => "OrderId".to_owned(),
            Self::AmmId => "AmmId".to_owned(),
            Self::Address => "Address".to_owned(),
            Self::BigInt => "BigInt".to_owned(),
            Self::Decimal => "Decimal".to_owned(),
            Self::Number => "number".to_owned(),
            Self::AuctionId => "string | integer".to_owned(),
            Self::AmmKind => "AmmKind".to_owned(),
            Self::Bytes => "bytes".to_owned(),
            Self::Reserves => "Reserves".to_owned(),
            Self::Entity(name) => (*name).to_owned(),
            Self::Map(key, value) => format!("map<{}, {}>", key.name(), value.name()),
            Self::List(item) => format!("list<{}>", item.name()),
        }
    }

    pub fn members(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::AmmKind => Some(AmmKind::VARIANTS),
            _ => None,
        }
    }

    fn schema(&self) -> Value {
        match self {
            Self::Boolean => json!({ "type": "boolean" }),
            Self::String => json!({ "type": "string" }),
            Self::Uint8 => json!({ "type": "integer", "minimum": 0, "maximum": 255 }),
            Self::Uint32 => json!({ "type": "integer", "minimum": 0, "maximum": u32::MAX }),
            Self::Int64 => json!({ "type": "integer", "format": "int64" }),
            Self::Number => json!({ "type": "number", "minimum": 0 }),
            Self::AuctionId => json!({ "oneOf": [{ "type": "string" }, { "type": "integer" }] }),
            Self::Bytes => json!({
                "type": "string",
                "format": "hex",
                "pattern": "^0x([0-9a-fA-F]{2})*$",
            }),
            Self::Reserves => json!({
                "oneOf": [
                    {
                        "type": "object",
                        "additionalProperties": reference("BigInt"),
                    },
                    {
                        "type": "object",
                        "additionalProperties": reference("WeightedReserve"),
                    },
                ],
            }),
            Self::Map(_, value) => json!({
                "type": "object",
                "additionalProperties": value.schema(),
            }),
            Self::List(item) => json!({ "type": "array", "items": item.schema() }),
            Self::TokenId
            | Self::OrderId
            | Self::AmmId
            | Self::Address
            | Self::BigInt
            | Self::Decimal
            | Self::AmmKind
            | Self::Entity(_) => reference(&self.name()),
        }
    }
}

/// Documented default of an optional field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    False,
    Zero,
    EmptyMap,
    EmptyList,
}

impl DefaultValue {
    pub fn to_json(self) -> Value {
        match self {
            Self::False => json!(false),
            Self::Zero => json!(0),
            Self::EmptyMap => json!({}),
            Self::EmptyList => json!([]),
        }
    }
}

/// Location of an entity's example inside one of the embedded example
/// documents, as a JSON pointer.
#[derive(Clone, Copy, Debug)]
pub struct Example {
    source: Source,
    pointer: &'static str,
    /// Pointers, relative to the example, of side data the entity doesn't
    /// declare.
    omit: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
enum Source {
    Problem,
    Solution,
}

impl Example {
    pub const fn problem(pointer: &'static str) -> Self {
        Self {
            source: Source::Problem,
            pointer,
            omit: &[],
        }
    }

    pub const fn solution(pointer: &'static str) -> Self {
        Self {
            source: Source::Solution,
            pointer,
            omit: &[],
        }
    }

    pub const fn omitting(self, omit: &'static [&'static str]) -> Self {
        Self {
            source: self.source,
            pointer: self.pointer,
            omit,
        }
    }

    fn resolve(self) -> Value {
        let document = match self.source {
            Source::Problem => example_instance(),
            Source::Solution => example_solution(),
        };
        let mut example = document.pointer(self.pointer).cloned().unwrap_or_default();
        for &pointer in self.omit {
            let (parent, key) = pointer.rsplit_once('/').unwrap_or(("", pointer));
            if let Some(Value::Object(parent)) = example.pointer_mut(parent) {
                parent.remove(key);
            }
        }
        example
    }
}

const fn required(name: &'static str, ty: Type, description: &'static str) -> Field {
    Field {
        name,
        ty,
        description,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, ty: Type, description: &'static str) -> Field {
    Field {
        name,
        ty,
        description,
        required: false,
        default: None,
    }
}

const fn defaulted(
    name: &'static str,
    ty: Type,
    description: &'static str,
    default: DefaultValue,
) -> Field {
    Field {
        name,
        ty,
        description,
        required: false,
        default: Some(default),
    }
}

static ENTITIES: &[Entity] = &[
    Entity {
        name: "TokenInfo",
        description: "Token-specific data.",
        extends: None,
        fields: &[
            optional("decimals", Type::Uint8, "Number of decimals."),
            optional("alias", Type::String, "Human-readable name (e.g. DAI)."),
            defaulted(
                "normalize_priority",
                Type::Int64,
                "Priority for solution price vector normalization purposes (larger=higher \
                 preference).",
                DefaultValue::Zero,
            ),
            optional("external_price", Type::Decimal, "External token price."),
            optional("internal_buffer", Type::BigInt, "Internal token buffer."),
        ],
        example: Example::problem("/tokens/0x6b175474e89094c44da98b954eedeac495271d0f"),
    },
    Entity {
        name: "TokenAmount",
        description: "Order/AMM cost and order fee.",
        extends: None,
        fields: &[
            required("amount", Type::BigInt, "Amount."),
            required("token", Type::TokenId, "Token."),
        ],
        example: Example::problem("/orders/0/fee"),
    },
    Entity {
        name: "Order",
        description: "Order data.",
        extends: None,
        fields: &[
            required("sell_token", Type::TokenId, "Token to be sold."),
            required("buy_token", Type::TokenId, "Token to be bought."),
            required(
                "sell_amount",
                Type::BigInt,
                "If is_sell_order=true indicates the maximum amount to sell, otherwise the \
                 maximum amount to sell in order to buy buy_amount.",
            ),
            required(
                "buy_amount",
                Type::BigInt,
                "If is_sell_order=false indicates the maximum amount to buy, otherwise the \
                 minimum amount to buy in order to sell sell_amount.",
            ),
            required(
                "allow_partial_fill",
                Type::Boolean,
                "If the order can sell/buy less than its maximum sell/buy amount.",
            ),
            required(
                "is_sell_order",
                Type::Boolean,
                "If it is a sell or buy order, changing the semantics of \
                 sell_amount/buy_amount accordingly.",
            ),
            defaulted(
                "is_liquidity_order",
                Type::Boolean,
                "Liquidity orders (from market makers) can not receive surplus.",
                DefaultValue::False,
            ),
            defaulted(
                "has_atomic_execution",
                Type::Boolean,
                "Indicates, if the order needs to be executed atomically.",
                DefaultValue::False,
            ),
            optional(
                "fee",
                Type::Entity("TokenAmount"),
                "Fee contribution when order is matched (pro-rata for partial matching).",
            ),
            optional("cost", Type::Entity("TokenAmount"), "Cost of matching the order."),
        ],
        example: Example::problem("/orders/0"),
    },
    Entity {
        name: "WeightedReserve",
        description: "Token balance and weight of a weighted-product AMM.",
        extends: None,
        fields: &[
            required("balance", Type::BigInt, "Token balance in AMM."),
            required("weight", Type::Decimal, "Weight of the token."),
        ],
        example: Example::problem(
            "/amms/03/reserves/0x6b175474e89094c44da98b954eedeac495271d0f",
        ),
    },
    Entity {
        name: "Amm",
        description: "AMM data.",
        extends: None,
        fields: &[
            required("kind", Type::AmmKind, "AMM type."),
            optional(
                "reserves",
                Type::Reserves,
                "AMM tokens and balances. Required for ConstantProduct (exactly two \
                 tokens) and WeightedProduct (at least two tokens) AMMs.",
            ),
            optional(
                "fee",
                Type::Decimal,
                "AMM trading fee (e.g. 0.003 for 0.3% fee).",
            ),
            optional("cost", Type::Entity("TokenAmount"), "Cost of using the pool."),
        ],
        example: Example::problem("/amms/01").omitting(&["/mandatory"]),
    },
    Entity {
        name: "Metadata",
        description: "Batch auction metadata.",
        extends: None,
        fields: &[
            optional(
                "environment",
                Type::String,
                "Runtime/blockchain environment.",
            ),
            required("auction_id", Type::AuctionId, "Auction identifier."),
            required("gas_price", Type::Number, "Current gas price."),
            required("native_token", Type::TokenId, "Wrapped native token."),
        ],
        example: Example::problem("/metadata"),
    },
    Entity {
        name: "BatchAuction",
        description: "Batch auction instance data.",
        extends: None,
        fields: &[
            required(
                "tokens",
                Type::Map(&Type::TokenId, &Type::Entity("TokenInfo")),
                "Tokens.",
            ),
            required(
                "orders",
                Type::Map(&Type::OrderId, &Type::Entity("Order")),
                "Orders.",
            ),
            required("metadata", Type::Entity("Metadata"), "Metadata."),
            defaulted(
                "amms",
                Type::Map(&Type::AmmId, &Type::Entity("Amm")),
                "AMMs.",
                DefaultValue::EmptyMap,
            ),
        ],
        example: Example::problem("").omitting(&[
            "/amms/01/mandatory",
            "/amms/02/mandatory",
            "/amms/03/mandatory",
            "/amms/04/mandatory",
        ]),
    },
    Entity {
        name: "ExecutedOrder",
        description: "Executed order data (solution).",
        extends: Some("Order"),
        fields: &[
            required("exec_buy_amount", Type::BigInt, "Executed buy amount."),
            required("exec_sell_amount", Type::BigInt, "Executed sell amount."),
        ],
        example: Example::solution("/orders/0"),
    },
    Entity {
        name: "ExecPlanCoords",
        description: "Execution plan coordinates.",
        extends: None,
        fields: &[
            required("sequence", Type::Uint32, "Sequence index."),
            required("position", Type::Uint32, "Position within the sequence."),
            defaulted(
                "internal",
                Type::Boolean,
                "Using internal liquidity.",
                DefaultValue::False,
            ),
        ],
        example: Example::solution("/amms/01/execution/0/exec_plan"),
    },
    Entity {
        name: "AmmExecution",
        description: "AMM settlement information.",
        extends: None,
        fields: &[
            required("sell_token", Type::TokenId, "Token sold by the AMM."),
            required("buy_token", Type::TokenId, "Token bought by the AMM."),
            required("exec_sell_amount", Type::BigInt, "Executed sell amount."),
            required("exec_buy_amount", Type::BigInt, "Executed buy amount."),
            optional(
                "exec_plan",
                Type::Entity("ExecPlanCoords"),
                "Execution plan coordinates.",
            ),
        ],
        example: Example::solution("/amms/01/execution/0"),
    },
    Entity {
        name: "ExecutedAmm",
        description: "AMM data with its executions (solution).",
        extends: Some("Amm"),
        fields: &[optional(
            "execution",
            Type::List(&Type::Entity("AmmExecution")),
            "AMM settlement data.",
        )],
        example: Example::solution("/amms/01"),
    },
    Entity {
        name: "InteractionData",
        description: "Interaction data.",
        extends: None,
        fields: &[
            required(
                "target",
                Type::Address,
                "Target contract address to interact with.",
            ),
            required(
                "value",
                Type::BigInt,
                "Value of native token, e.g. amount eth in eth transfer.",
            ),
            required("call_data", Type::Bytes, "Interaction encoding."),
        ],
        example: Example::solution("/interaction_data/0"),
    },
    Entity {
        name: "SettledBatchAuction",
        description: "Settled batch auction data (solution).",
        extends: None,
        fields: &[
            optional(
                "tokens",
                Type::Map(&Type::TokenId, &Type::Entity("TokenInfo")),
                "Tokens referenced by the solution, when validated on its own.",
            ),
            required(
                "orders",
                Type::Map(&Type::OrderId, &Type::Entity("ExecutedOrder")),
                "Executed orders.",
            ),
            required(
                "prices",
                Type::Map(&Type::TokenId, &Type::BigInt),
                "Settled price for each token.",
            ),
            required(
                "amms",
                Type::Map(&Type::AmmId, &Type::Entity("ExecutedAmm")),
                "Executed AMMs.",
            ),
            defaulted(
                "interaction_data",
                Type::List(&Type::Entity("InteractionData")),
                "List of interaction data.",
                DefaultValue::EmptyList,
            ),
        ],
        example: Example::solution(""),
    },
];

/// Descriptors of every entity, leaves first.
pub fn entities() -> &'static [Entity] {
    ENTITIES
}

pub fn entity(name: &str) -> Option<&'static Entity> {
    ENTITIES.iter().find(|entity| entity.name == name)
}

fn reference(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Schemas of the scalar types.
fn primitives() -> Vec<(&'static str, Value)> {
    let identifier = |description: &str| {
        json!({ "type": "string", "minLength": 1, "description": description })
    };
    vec![
        ("TokenId", identifier("Token unique identifier.")),
        ("OrderId", identifier("Order unique identifier.")),
        ("AmmId", identifier("AMM unique identifier.")),
        ("Address", identifier("Contract address.")),
        (
            "BigInt",
            json!({
                "type": "string",
                "description": "Non-negative integer of arbitrary precision, as a string.",
                "pattern": "^[0-9]+$",
                "example": "1000000000000000000",
            }),
        ),
        (
            "Decimal",
            json!({
                "type": "string",
                "description": "Non-negative decimal number of arbitrary precision, as a \
                                string. JSON numbers are accepted by their exact text.",
                "pattern": "^[0-9]+(\\.[0-9]+)?$",
                "example": "0.003",
            }),
        ),
        (
            "AmmKind",
            json!({
                "type": "string",
                "description": "AMM kind.",
                "enum": AmmKind::VARIANTS,
            }),
        ),
    ]
}

fn field_schema(field: &Field) -> Value {
    let mut schema = match field.ty.schema() {
        reference @ Value::Object(_) if reference.get("$ref").is_some() => {
            json!({ "allOf": [reference] })
        }
        schema => schema,
    };
    if let Value::Object(schema) = &mut schema {
        schema.insert("description".to_owned(), field.description.into());
        if let Some(default) = field.default {
            schema.insert("default".to_owned(), default.to_json());
        }
    }
    schema
}

fn entity_schema(entity: &Entity) -> Value {
    let properties = entity
        .fields
        .iter()
        .map(|field| (field.name.to_owned(), field_schema(field)))
        .collect::<Map<_, _>>();
    let mut object = json!({ "type": "object", "properties": properties });
    let required = entity.required().collect::<Vec<_>>();
    if !required.is_empty() {
        object["required"] = json!(required);
    }

    let mut schema = match entity.extends {
        Some(base) => json!({
            "description": entity.description,
            "allOf": [reference(base), object],
        }),
        None => {
            object["description"] = entity.description.into();
            object
        }
    };
    schema["example"] = entity.example();
    schema
}

/// Renders the OpenAPI 3 component document.
pub fn openapi() -> Value {
    let mut schemas = Map::new();
    for (name, schema) in primitives() {
        schemas.insert(name.to_owned(), schema);
    }
    for entity in ENTITIES {
        schemas.insert(entity.name.to_owned(), entity_schema(entity));
    }
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Batch auction",
            "description": "Problem (batch auction instance) and solution (settled batch \
                            auction) interchange format between an auction coordinator and \
                            a solver.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {},
        "components": { "schemas": schemas },
    })
}
