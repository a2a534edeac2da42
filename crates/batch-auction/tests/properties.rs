use {
    batch_auction::{Config, Error, parse_problem, parse_solution, to_json},
    proptest::prelude::*,
    serde_json::{Map, Value, json},
};

#[derive(Clone, Debug)]
struct Order {
    sell: usize,
    buy: usize,
    sell_amount: String,
    buy_amount: String,
    partial: bool,
    is_sell: bool,
}

#[derive(Clone, Copy, Debug)]
enum SolutionDefect {
    ZeroAmount,
    SameExecutionTokens,
    MissingPrices,
}

#[derive(Clone, Copy, Debug)]
enum Defect {
    ZeroAmount,
    UndeclaredToken,
    MissingMetadata,
}

fn token(i: usize) -> String {
    format!("0x{i:040x}")
}

fn amount() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,40}"
}

fn orders(tokens: usize) -> impl Strategy<Value = Vec<Order>> {
    let order = (
        0..tokens,
        1..tokens,
        amount(),
        amount(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(sell, offset, sell_amount, buy_amount, partial, is_sell)| Order {
            sell,
            buy: (sell + offset) % tokens,
            sell_amount,
            buy_amount,
            partial,
            is_sell,
        });
    proptest::collection::vec(order, 1..5)
}

fn problem() -> impl Strategy<Value = (Value, Vec<Order>)> {
    (2_usize..6)
        .prop_flat_map(|tokens| {
            (
                Just(tokens),
                orders(tokens),
                "[1-9][0-9]{0,4}(\\.[0-9]{1,10})?",
                amount(),
                any::<bool>(),
            )
        })
        .prop_map(|(tokens, orders, price, reserve, with_amm)| {
            (build(tokens, &orders, &price, &reserve, with_amm), orders)
        })
}

fn build(tokens: usize, orders: &[Order], price: &str, reserve: &str, with_amm: bool) -> Value {
    let tokens = (0..tokens)
        .map(|i| (token(i), json!({ "decimals": 18, "external_price": price })))
        .collect::<Map<_, _>>();
    let orders = orders
        .iter()
        .enumerate()
        .map(|(i, order)| {
            let value = json!({
                "sell_token": token(order.sell),
                "buy_token": token(order.buy),
                "sell_amount": order.sell_amount,
                "buy_amount": order.buy_amount,
                "allow_partial_fill": order.partial,
                "is_sell_order": order.is_sell,
                "cost": { "amount": reserve, "token": token(order.buy) },
            });
            (i.to_string(), value)
        })
        .collect::<Map<_, _>>();
    let mut problem = json!({
        "tokens": tokens,
        "orders": orders,
        "metadata": {
            "auction_id": "1",
            "gas_price": serde_json::from_str::<Value>(price).unwrap(),
            "native_token": token(0),
        },
    });
    if with_amm {
        problem["amms"] = json!({
            "01": {
                "kind": "ConstantProduct",
                "reserves": { token(0): reserve, token(1): reserve },
                "fee": "0.003",
            },
        });
    }
    problem
}

fn settle(orders: &[Order]) -> Value {
    let orders = orders
        .iter()
        .enumerate()
        .map(|(i, order)| {
            let value = json!({
                "sell_token": token(order.sell),
                "buy_token": token(order.buy),
                "sell_amount": order.sell_amount,
                "buy_amount": order.buy_amount,
                "allow_partial_fill": order.partial,
                "is_sell_order": order.is_sell,
                "exec_sell_amount": order.sell_amount,
                "exec_buy_amount": order.buy_amount,
            });
            (i.to_string(), value)
        })
        .collect::<Map<_, _>>();
    let reserve = &orders["0"]["sell_amount"];
    json!({
        "orders": orders,
        "prices": { token(0): "1000000000000000000" },
        "amms": {
            "01": {
                "kind": "ConstantProduct",
                "reserves": { token(0): reserve, token(1): reserve },
                "execution": [
                    {
                        "sell_token": token(0),
                        "buy_token": token(1),
                        "exec_sell_amount": reserve,
                        "exec_buy_amount": reserve,
                        "exec_plan": { "sequence": 0, "position": 0 },
                    },
                ],
            },
        },
        "interaction_data": [
            { "target": token(0), "value": "0", "call_data": "0xa9059cbb" },
        ],
    })
}

fn damage(problem: &mut Value, defect: Defect) {
    match defect {
        Defect::ZeroAmount => problem["orders"]["0"]["buy_amount"] = json!("0"),
        Defect::UndeclaredToken => problem["orders"]["0"]["sell_token"] = json!("0xundeclared"),
        Defect::MissingMetadata => {
            problem.as_object_mut().unwrap().remove("metadata");
        }
    }
}

fn damage_solution(solution: &mut Value, defect: SolutionDefect) {
    match defect {
        SolutionDefect::ZeroAmount => solution["orders"]["0"]["buy_amount"] = json!("0"),
        SolutionDefect::SameExecutionTokens => {
            solution["amms"]["01"]["execution"][0]["buy_token"] = json!(token(0))
        }
        SolutionDefect::MissingPrices => {
            solution.as_object_mut().unwrap().remove("prices");
        }
    }
}

fn insert_unknown(object: &mut Value) {
    if let Some(object) = object.as_object_mut() {
        let unknown = json!({ "nested": [1, "two", null], "flag": true });
        object.insert("x_unknown".to_owned(), unknown);
    }
}

/// Adds an unknown field to every entity of a solution.
fn extend_solution(solution: &mut Value) {
    for map in ["orders", "amms"] {
        if let Some(entries) = solution.get_mut(map).and_then(Value::as_object_mut) {
            entries.values_mut().for_each(insert_unknown);
        }
    }
    let amms = solution["amms"].as_object_mut();
    for amm in amms.into_iter().flat_map(|amms| amms.values_mut()) {
        let executions = amm["execution"].as_array_mut();
        for execution in executions.into_iter().flatten() {
            if let Some(plan) = execution.get_mut("exec_plan") {
                insert_unknown(plan);
            }
            insert_unknown(execution);
        }
    }
    if let Some(interactions) = solution["interaction_data"].as_array_mut() {
        interactions.iter_mut().for_each(insert_unknown);
    }
    insert_unknown(solution);
}

/// Adds an unknown field to every entity of a problem.
fn extend(problem: &mut Value) {
    for map in ["tokens", "orders", "amms"] {
        if let Some(entries) = problem.get_mut(map).and_then(Value::as_object_mut) {
            entries.values_mut().for_each(insert_unknown);
        }
    }
    let orders = problem["orders"].as_object_mut();
    for order in orders.into_iter().flat_map(|orders| orders.values_mut()) {
        if let Some(cost) = order.get_mut("cost") {
            insert_unknown(cost);
        }
    }
    if let Some(metadata) = problem.get_mut("metadata") {
        insert_unknown(metadata);
    }
    insert_unknown(problem);
}

/// Reverses the key order of every object.
fn reverse(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .rev()
                .map(|(key, value)| (key.clone(), reverse(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(reverse).collect()),
        other => other.clone(),
    }
}

fn accepted(problem: &Value) -> Result<(), Error> {
    parse_problem(&problem.to_string(), &Config::default()).map(|_| ())
}

fn solution_accepted(solution: &Value) -> Result<(), Error> {
    parse_solution(&solution.to_string(), &Config::default()).map(|_| ())
}

fn defect() -> impl Strategy<Value = Option<Defect>> {
    proptest::option::of(prop_oneof![
        Just(Defect::ZeroAmount),
        Just(Defect::UndeclaredToken),
        Just(Defect::MissingMetadata),
    ])
}

fn solution_defect() -> impl Strategy<Value = Option<SolutionDefect>> {
    proptest::option::of(prop_oneof![
        Just(SolutionDefect::ZeroAmount),
        Just(SolutionDefect::SameExecutionTokens),
        Just(SolutionDefect::MissingPrices),
    ])
}

proptest! {
    #[test]
    fn problem_round_trip((problem, _) in problem()) {
        let config = Config::default();
        let parsed = parse_problem(&problem.to_string(), &config).unwrap().value;
        let again = parse_problem(&to_json(&parsed).unwrap(), &config).unwrap().value;
        prop_assert_eq!(again, parsed);
    }

    #[test]
    fn solution_round_trip((_, orders) in problem()) {
        let config = Config::default();
        let settled = settle(&orders).to_string();
        let parsed = parse_solution(&settled, &config).unwrap().value;
        let again = parse_solution(&to_json(&parsed).unwrap(), &config).unwrap().value;
        prop_assert_eq!(again, parsed);
    }

    #[test]
    fn unknown_fields_do_not_change_acceptance((mut problem, _) in problem(), defect in defect()) {
        if let Some(defect) = defect {
            damage(&mut problem, defect);
        }
        let mut extended = problem.clone();
        extend(&mut extended);
        prop_assert_eq!(accepted(&extended), accepted(&problem));
    }

    #[test]
    fn key_order_does_not_change_acceptance((mut problem, _) in problem(), defect in defect()) {
        if let Some(defect) = defect {
            damage(&mut problem, defect);
        }
        let reversed = reverse(&problem);
        prop_assert_eq!(accepted(&reversed), accepted(&problem));

        if accepted(&problem).is_ok() {
            let config = Config::default();
            let mut original = parse_problem(&problem.to_string(), &config).unwrap().value;
            let mut reversed = parse_problem(&reversed.to_string(), &config).unwrap().value;
            original.sort_keys();
            reversed.sort_keys();
            prop_assert_eq!(to_json(&original).unwrap(), to_json(&reversed).unwrap());
        }
    }

    #[test]
    fn unknown_fields_do_not_change_solution_acceptance(
        (_, orders) in problem(),
        defect in solution_defect(),
    ) {
        let mut solution = settle(&orders);
        if let Some(defect) = defect {
            damage_solution(&mut solution, defect);
        }
        let mut extended = solution.clone();
        extend_solution(&mut extended);
        prop_assert_eq!(solution_accepted(&extended), solution_accepted(&solution));
        if defect.is_none() {
            prop_assert!(solution_accepted(&extended).is_ok());
        }
    }

    #[test]
    fn key_order_does_not_change_solution_acceptance(
        (_, orders) in problem(),
        defect in solution_defect(),
    ) {
        let mut solution = settle(&orders);
        if let Some(defect) = defect {
            damage_solution(&mut solution, defect);
        }
        prop_assert_eq!(solution_accepted(&reverse(&solution)), solution_accepted(&solution));
    }
}
