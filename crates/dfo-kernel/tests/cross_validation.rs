//! Cross-validation of every closed-form counter against brute-force
//! enumeration, plus the algebraic identities the counters rely on.

use dfo_kernel::{
    BigUint, DecreasingSequence, FiniteChain, OperatorClass, RestrictionGenerator, SearchBudget,
    bounded_plane_partition_count, build_operator, count_exhaustive, count_operators,
    enumerate_operators, fixed_column_count, plane_partition_count,
};

fn exhaustive(n: u32, class: OperatorClass) -> BigUint {
    count_exhaustive(n, class, SearchBudget::UNLIMITED).unwrap()
}

#[test]
fn closed_forms_match_enumeration_up_to_three() {
    for class in OperatorClass::ALL {
        for n in 1..=3 {
            assert_eq!(
                count_operators(n, class).unwrap(),
                exhaustive(n, class),
                "{class} on L_{n}"
            );
        }
    }
}

#[test]
fn commutative_and_structured_classes_match_enumeration_at_four() {
    for class in [
        OperatorClass::CommutativeConjunction,
        OperatorClass::NpConjunction,
        OperatorClass::OpConjunction,
        OperatorClass::SmoothConjunction,
        OperatorClass::CpImplication,
        OperatorClass::TNorm,
        OperatorClass::TConorm,
        OperatorClass::Copula,
        OperatorClass::Negation,
    ] {
        assert_eq!(count_operators(4, class).unwrap(), exhaustive(4, class), "{class}");
    }
}

#[test]
fn aggregation_reference_values() {
    assert_eq!(count_operators(1, OperatorClass::Aggregation).unwrap(), BigUint::from(4u32));
    assert_eq!(count_operators(2, OperatorClass::Aggregation).unwrap(), BigUint::from(136u32));
}

#[test]
fn enumerated_operators_validate_as_their_class() {
    for class in OperatorClass::ALL.into_iter().filter(|c| c.is_binary()) {
        let spec = class.spec();
        for operator in enumerate_operators(3, class, SearchBudget::UNLIMITED).unwrap() {
            let operator = operator.unwrap();
            let rows = operator
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(i64::from).collect())
                .collect();
            let built = build_operator(3, &spec, rows).unwrap();
            assert!(built.is_conforming(), "{class}:\n{operator}\n{:?}", built.violations);
            assert_eq!(built.operator, operator);
        }
    }
}

#[test]
fn subclasses_never_outnumber_their_parents() {
    let pairs = [
        (OperatorClass::CommutativeAggregation, OperatorClass::Aggregation),
        (OperatorClass::Conjunction, OperatorClass::Aggregation),
        (OperatorClass::CommutativeConjunction, OperatorClass::Conjunction),
        (OperatorClass::NpConjunction, OperatorClass::CbConjunction),
        (OperatorClass::CbConjunction, OperatorClass::Conjunction),
        (OperatorClass::IpConjunction, OperatorClass::Conjunction),
        (OperatorClass::OpConjunction, OperatorClass::IpConjunction),
        (OperatorClass::SmoothConjunction, OperatorClass::Conjunction),
        (OperatorClass::TNorm, OperatorClass::CommutativeConjunction),
        (OperatorClass::TNorm, OperatorClass::NpConjunction),
        (OperatorClass::Copula, OperatorClass::NpConjunction),
    ];
    for n in 1..=6 {
        for (sub, parent) in pairs {
            assert!(
                count_operators(n, sub).unwrap() <= count_operators(n, parent).unwrap(),
                "{sub} > {parent} on L_{n}"
            );
        }
    }
}

#[test]
fn fixed_columns_partition_the_bounded_count() {
    for n in 1..=4u32 {
        let chain = FiniteChain::new(n).unwrap();
        // Every decreasing sequence dominated by the full column.
        for increasing in RestrictionGenerator::bounded_by(vec![n; n as usize]).step_by(3) {
            let bound =
                DecreasingSequence::new(chain, increasing.into_iter().rev().collect()).unwrap();
            let mut total = BigUint::from(0u32);
            for smaller in RestrictionGenerator::bounded_by(bound.increasing()) {
                let exact =
                    DecreasingSequence::new(chain, smaller.into_iter().rev().collect()).unwrap();
                total += fixed_column_count(n, &exact, SearchBudget::UNLIMITED).unwrap().count;
            }
            assert_eq!(
                total,
                bounded_plane_partition_count(n, &bound).unwrap(),
                "bound {bound} on L_{n}"
            );
        }
    }
}

#[test]
fn box_counts_are_positive_integers() {
    for a in 1..=6 {
        for b in 1..=6 {
            for c in 1..=6 {
                assert!(plane_partition_count(a, b, c).unwrap() >= BigUint::from(1u32));
            }
        }
    }
}

#[test]
fn conjunction_counts_grow_fast_but_stay_exact() {
    let count = count_operators(8, OperatorClass::Conjunction).unwrap();
    assert!(count > BigUint::from(u64::MAX >> 20));
    let again = count_operators(8, OperatorClass::Conjunction).unwrap();
    assert_eq!(count, again);
}
