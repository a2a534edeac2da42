//! Invariants spanning several fields of one entity or several entities of
//! one document.

use {
    crate::{
        auction::{Amm, AmmKind, AmmParameters, BatchAuction, Order, TokenInfo, WeightedReserve},
        error::{Error, Path},
        ids::TokenId,
        reader::{Decode, Field, Reader, mismatch},
        report::Warning,
        solution::SettledBatchAuction,
    },
    bigdecimal::{BigDecimal, One},
    indexmap::IndexMap,
    number::{BigInt, Decimal},
    serde_json::Value,
};

pub(crate) type Tokens = IndexMap<TokenId, TokenInfo>;

pub(crate) fn distinct_tokens(sell: &TokenId, buy: &TokenId, path: &Path) -> Result<(), Error> {
    if sell == buy {
        return Err(Error::InvalidValue {
            path: path.join("buy_token"),
            reason: "buy token must differ from sell token",
        });
    }
    Ok(())
}

pub(crate) fn positive(amount: &BigInt, path: &Path) -> Result<(), Error> {
    if amount.is_zero() {
        return Err(Error::InvalidValue {
            path: path.clone(),
            reason: "amount must be positive",
        });
    }
    Ok(())
}

/// Reads the reserves of an AMM according to its kind.
pub(crate) fn reserves(
    kind: AmmKind,
    field: Field<'_>,
    amm: &Path,
    reader: &mut Reader<'_>,
) -> Result<AmmParameters, Error> {
    let shape_mismatch = || Error::VariantShapeMismatch {
        path: amm.clone(),
        kind,
    };
    match kind {
        AmmKind::ConstantProduct => {
            let (path, value) = field.required_value()?;
            let entries = value.as_object().ok_or_else(|| mismatch(&path, "object", value))?;
            if entries.len() != 2 || entries.values().any(Value::is_object) {
                return Err(shape_mismatch());
            }
            Ok(AmmParameters::ConstantProduct {
                reserves: Decode::decode(value, &path, reader)?,
            })
        }
        AmmKind::WeightedProduct => {
            let (path, value) = field.required_value()?;
            let entries = value.as_object().ok_or_else(|| mismatch(&path, "object", value))?;
            if entries.len() < 2 || !entries.values().all(Value::is_object) {
                return Err(shape_mismatch());
            }
            let reserves: IndexMap<TokenId, WeightedReserve> =
                Decode::decode(value, &path, reader)?;
            check_weights(&reserves, &path, reader);
            Ok(AmmParameters::WeightedProduct { reserves })
        }
        AmmKind::Stable => Ok(AmmParameters::Stable {
            reserves: field.optional(reader)?,
        }),
        AmmKind::Concentrated => Ok(AmmParameters::Concentrated {
            reserves: field.optional(reader)?,
        }),
    }
}

/// Weights should sum to 1. A mismatch is reported, never rejected.
fn check_weights(
    reserves: &IndexMap<TokenId, WeightedReserve>,
    path: &Path,
    reader: &mut Reader<'_>,
) {
    let sum = reserves
        .values()
        .map(|reserve| reserve.weight.to_big_decimal())
        .fold(BigDecimal::from(0), |sum, weight| sum + weight);
    let tolerance = BigDecimal::new(1.into(), 9);
    if (&sum - BigDecimal::one()).abs() <= tolerance {
        return;
    }
    if let Some(sum) = Decimal::from_big_decimal(&sum) {
        reader.report().warn(Warning::WeightSum {
            path: path.clone(),
            sum,
        });
    }
}

fn declared(tokens: &Tokens, id: &TokenId, path: Path) -> Result<(), Error> {
    if tokens.contains_key(id) {
        return Ok(());
    }
    Err(Error::UnknownTokenReference {
        path,
        id: id.clone(),
    })
}

fn order_references(tokens: &Tokens, order: &Order, path: &Path) -> Result<(), Error> {
    declared(tokens, &order.sell_token, path.join("sell_token"))?;
    declared(tokens, &order.buy_token, path.join("buy_token"))?;
    if let Some(fee) = &order.fee {
        declared(tokens, &fee.token, path.join("fee").join("token"))?;
    }
    if let Some(cost) = &order.cost {
        declared(tokens, &cost.token, path.join("cost").join("token"))?;
    }
    Ok(())
}

fn amm_references(tokens: &Tokens, amm: &Amm, path: &Path) -> Result<(), Error> {
    for token in amm.parameters.tokens().into_iter().flatten() {
        declared(tokens, token, path.join("reserves").join(token))?;
    }
    if let Some(cost) = &amm.cost {
        declared(tokens, &cost.token, path.join("cost").join("token"))?;
    }
    Ok(())
}

/// Every token referenced by the auction is declared in its token table.
pub(crate) fn problem_references(auction: &BatchAuction) -> Result<(), Error> {
    let tokens = &auction.tokens;
    let root = Path::root();
    for (id, order) in &auction.orders {
        order_references(tokens, order, &root.join("orders").join(id))?;
    }
    for (id, amm) in &auction.amms {
        amm_references(tokens, amm, &root.join("amms").join(id))?;
    }
    declared(
        tokens,
        &auction.metadata.native_token,
        root.join("metadata").join("native_token"),
    )
}

/// Every token referenced by the solution is declared in `tokens`.
pub(crate) fn solution_references(
    solution: &SettledBatchAuction,
    tokens: &Tokens,
) -> Result<(), Error> {
    let root = Path::root();
    for id in solution.prices.keys() {
        declared(tokens, id, root.join("prices").join(id))?;
    }
    for (id, order) in &solution.orders {
        order_references(tokens, &order.order, &root.join("orders").join(id))?;
    }
    for (id, amm) in &solution.amms {
        amm_references(tokens, &amm.amm, &root.join("amms").join(id))?;
    }
    for (path, _, execution) in solution.executions() {
        declared(tokens, &execution.sell_token, path.join("sell_token"))?;
        declared(tokens, &execution.buy_token, path.join("buy_token"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{reader::Object, report::Report},
        number::Limits,
        serde_json::json,
    };

    fn amm(value: Value) -> (Result<Amm, Error>, Report) {
        let limits = Limits::default();
        let mut reader = Reader::new(&limits);
        let result = Amm::decode(&value, &"amms.03".into(), &mut reader);
        (result, reader.into_report())
    }

    #[test]
    fn constant_product_rejects_weighted_reserves() {
        let (result, _) = amm(json!({
            "kind": "ConstantProduct",
            "reserves": {
                "A": { "balance": "1", "weight": "0.5" },
                "B": { "balance": "1", "weight": "0.5" },
            },
        }));
        assert_eq!(
            result,
            Err(Error::VariantShapeMismatch {
                path: "amms.03".into(),
                kind: AmmKind::ConstantProduct,
            })
        );
    }

    #[test]
    fn constant_product_needs_two_tokens() {
        let (result, _) = amm(json!({
            "kind": "ConstantProduct",
            "reserves": { "A": "1", "B": "2", "C": "3" },
        }));
        assert!(matches!(result, Err(Error::VariantShapeMismatch { .. })));

        let (result, _) = amm(json!({ "kind": "ConstantProduct" }));
        assert_eq!(
            result,
            Err(Error::MissingRequiredField("amms.03.reserves".into()))
        );

        let (result, _) = amm(json!({ "kind": "ConstantProduct", "reserves": ["A", "B"] }));
        assert!(matches!(result, Err(Error::TypeMismatch { got: "array", .. })));
    }

    #[test]
    fn weighted_product_rejects_plain_reserves() {
        let (result, _) = amm(json!({
            "kind": "WeightedProduct",
            "reserves": { "A": "1", "B": "2" },
        }));
        assert_eq!(
            result,
            Err(Error::VariantShapeMismatch {
                path: "amms.03".into(),
                kind: AmmKind::WeightedProduct,
            })
        );

        let (result, _) = amm(json!({
            "kind": "WeightedProduct",
            "reserves": { "A": { "balance": "1", "weight": "1" } },
        }));
        assert!(matches!(result, Err(Error::VariantShapeMismatch { .. })));
    }

    #[test]
    fn weight_sum_is_a_warning() {
        let (result, report) = amm(json!({
            "kind": "WeightedProduct",
            "reserves": {
                "A": { "balance": "1", "weight": "0.4" },
                "B": { "balance": "1", "weight": "0.6" },
            },
        }));
        assert!(result.is_ok());
        assert!(report.warnings.is_empty());

        let (result, report) = amm(json!({
            "kind": "WeightedProduct",
            "reserves": {
                "A": { "balance": "1", "weight": "0.5" },
                "B": { "balance": "1", "weight": "0.6" },
            },
        }));
        assert!(result.is_ok());
        assert_eq!(
            report.warnings,
            vec![Warning::WeightSum {
                path: "amms.03.reserves".into(),
                sum: "1.1".parse().unwrap(),
            }]
        );
    }

    #[test]
    fn weight_sum_tolerance() {
        let (_, report) = amm(json!({
            "kind": "WeightedProduct",
            "reserves": {
                "A": { "balance": "1", "weight": "0.3333333333" },
                "B": { "balance": "1", "weight": "0.6666666666" },
            },
        }));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn stable_and_concentrated_keep_reserves_verbatim() {
        let reserves = json!({ "A": { "anything": [1, 2, 3] } });
        let (result, _) = amm(json!({ "kind": "Stable", "reserves": reserves }));
        assert_eq!(
            result.unwrap().parameters,
            AmmParameters::Stable {
                reserves: Some(reserves)
            }
        );

        let (result, _) = amm(json!({ "kind": "Concentrated" }));
        assert_eq!(
            result.unwrap().parameters,
            AmmParameters::Concentrated { reserves: None }
        );
    }

    #[test]
    fn unknown_kind() {
        let (result, _) = amm(json!({ "kind": "constantProduct", "reserves": {} }));
        assert_eq!(
            result,
            Err(Error::UnknownEnumVariant {
                path: "amms.03.kind".into(),
                value: "constantProduct".to_owned(),
            })
        );
    }

    #[test]
    fn order_amounts_and_tokens() {
        let limits = Limits::default();
        let mut reader = Reader::new(&limits);
        let order = |sell: &str, buy: &str, sell_amount: &str| {
            json!({
                "sell_token": sell,
                "buy_token": buy,
                "sell_amount": sell_amount,
                "buy_amount": "1",
                "allow_partial_fill": false,
                "is_sell_order": true,
            })
        };
        let path = Path::from("orders.0");

        let value = order("A", "B", "0");
        let mut object = Object::new(&value, &path).unwrap();
        assert_eq!(
            Order::read(&mut object, &mut reader),
            Err(Error::InvalidValue {
                path: "orders.0.sell_amount".into(),
                reason: "amount must be positive",
            })
        );

        let value = order("A", "A", "1");
        let mut object = Object::new(&value, &path).unwrap();
        assert!(matches!(
            Order::read(&mut object, &mut reader),
            Err(Error::InvalidValue { .. })
        ));
    }
}
