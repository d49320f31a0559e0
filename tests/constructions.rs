//! End-to-end tests for code construction and code algebra.

use std::sync::Arc;

use codealgebra::prelude::*;

#[test]
fn test_bch_with_offset_three() {
    let code = CyclicCode::bch(2, 15, 4, 3).unwrap();
    let mut cosets: Vec<Vec<usize>> = code
        .cyclotomic_cosets()
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.sort_unstable();
            c
        })
        .collect();
    cosets.sort();
    // C1, C3, C5 modulo 15
    assert_eq!(cosets, vec![vec![1, 2, 4, 8], vec![3, 6, 9, 12], vec![5, 10]]);
    assert_eq!(code.generator_polynomial().degree(), Some(10));
    assert_eq!(code.dimension(), 5);
    assert!(code.bounds().lower() >= 7);
    assert_eq!(code.code_type(), CodeType::Bch);
}

#[test]
fn test_reed_solomon_13() {
    let code = CyclicCode::reed_solomon(13, 5, 1).unwrap();
    assert_eq!(code.length(), 12);
    assert_eq!(code.dimension(), 8);
    assert_eq!(code.distance(), Distance::Known(5));
    assert_eq!(code.name(), "[12, 8, 5] ReedSolomon code over GF(13)");
}

#[test]
fn test_direct_sum_distance_is_minimum() {
    let field = GaloisField::new(2).unwrap();
    let a = hamming_code(2, 3).unwrap();
    let generator = FieldMatrix::from_rows(
        Arc::clone(&field),
        &[vec![1, 1, 0, 0, 0], vec![0, 0, 1, 1, 1]],
    )
    .unwrap();
    let mut b = LinearCode::from_generator_matrix(&generator).unwrap();
    b.compute_weight_enumerator(&Config::default()).unwrap();
    assert_eq!(b.distance(), Distance::Known(2));

    let sum = a.direct_sum(&b).unwrap();
    assert_eq!((sum.length(), sum.dimension()), (12, 6));
    assert_eq!(sum.distance(), Distance::Known(2));
}

#[test]
fn test_construction_x_precondition() {
    // Hamming [7, 4] is not a subcode of the repetition code [7, 1]
    let c1 = hamming_code(2, 3).unwrap();
    let c2 = repetition_code(2, 7).unwrap();
    let c3 = repetition_code(2, 3).unwrap();
    let err = construction_x(&c1, &c2, &c3).unwrap_err();
    assert!(matches!(err, Error::ConstructionPrecondition(_)));
    assert_eq!(err.category(), codealgebra::error::ErrorCategory::ConstructionPrecondition);
}

#[test]
fn test_shorten_is_dual_puncture_dual() {
    let code = hamming_code(2, 4).unwrap();
    let columns = [0, 5, 7];
    let shortened = code.shorten(&columns).unwrap();
    let reference = code
        .dual()
        .unwrap()
        .puncture(&columns)
        .unwrap()
        .dual()
        .unwrap();
    assert!(shortened.same_code(&reference));
    assert_eq!(shortened.length(), 12);
    assert_eq!(shortened.dimension(), 8);

    // Reinserting zeros at the shortened coordinates gives codewords
    for row in shortened.generator_matrix().rows() {
        let mut word = Vec::with_capacity(15);
        let mut values = row.into_iter();
        for i in 0..15 {
            if columns.contains(&i) {
                word.push(0);
            } else {
                word.push(values.next().unwrap());
            }
        }
        assert!(code.is_codeword(&word).unwrap());
    }
}

#[test]
fn test_expurgate_then_augment_restores_code() {
    let code = CyclicCode::bch(2, 15, 3, 1).unwrap().into_linear();
    let removed = [1, 4];
    let expurgated = code.expurgate(&removed).unwrap();
    let rows: Vec<Vec<u32>> = removed
        .iter()
        .map(|&i| code.generator_matrix().row(i))
        .collect();
    let rows = FieldMatrix::from_rows(Arc::clone(code.field()), &rows).unwrap();
    let restored = expurgated.augment(&rows).unwrap();
    assert!(restored.same_code(&code));
}

#[test]
fn test_dual_twice_keeps_cyclic_code() {
    let code = CyclicCode::new(3, 13, &[1]).unwrap();
    let linear = code.as_linear();
    assert!(linear.dual().unwrap().dual().unwrap().same_code(linear));
    assert!(code.dual().unwrap().dual().unwrap().as_linear().same_code(linear));
}

#[test]
fn test_config_round_trip_and_limits() {
    let config = Config::default()
        .with_hartmann_tzeng_refinement(false)
        .with_max_field_order(64);
    let json = config.to_json().unwrap();
    let restored = Config::from_json(&json).unwrap();
    assert!(!restored.hartmann_tzeng_refinement());

    // GF(2^11) is needed for length 23
    let result = CyclicCode::new_with_config(2, 23, &[1], &restored);
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
    let code = CyclicCode::new_with_config(2, 21, &[1], &restored).unwrap();
    assert_eq!(code.config(), &restored);
}

#[test]
fn test_hartmann_tzeng_switch_changes_lower_bound() {
    // Binary quadratic-residue code [17, 9, 5]: BCH bound 3, Hartmann-Tzeng 4
    let refined = CyclicCode::new(2, 17, &[1]).unwrap();
    assert_eq!(refined.dimension(), 9);
    assert_eq!(refined.design_distance(), 3);
    assert_eq!(refined.hartmann_tzeng_bound(), 4);
    assert_eq!(refined.bounds().lower(), 4);
    assert!(refined.bounds().upper() >= 5);

    let config = Config::default().with_hartmann_tzeng_refinement(false);
    let plain = CyclicCode::new_with_config(2, 17, &[1], &config).unwrap();
    assert_eq!(plain.design_distance(), 3);
    assert_eq!(plain.hartmann_tzeng_bound(), 3);
    assert_eq!(plain.bounds().lower(), 3);
    assert!(plain.as_linear().same_code(refined.as_linear()));
}

#[test]
fn test_trait_objects_report_family() {
    let codes: Vec<Box<dyn Code>> = vec![
        Box::new(golay_code(2).unwrap()),
        Box::new(extended_golay_code(3).unwrap()),
        Box::new(simplex_code(2, 4).unwrap()),
        Box::new(reed_muller_code(2, 4).unwrap()),
    ];
    let names: Vec<String> = codes.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "[23, 12, 7] Golay code over GF(2)",
            "[12, 6, 6] Golay code over GF(3)",
            "[15, 4, 8] Simplex code over GF(2)",
            "[16, 11, 4] ReedMuller code over GF(2)",
        ]
    );
}
