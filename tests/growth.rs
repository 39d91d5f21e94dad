use pigsim::growth::{self, StepContext};
use pigsim::model::{Pig, PigKind, Region};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

fn test_pig(kind: PigKind, weight: f64) -> Pig {
    let region = Region { start: 0, end: 3 };
    Pig::new(0, kind, weight, region, (0, 0)).expect("failed to create pig")
}

fn ctx() -> StepContext {
    StepContext {
        ambient_temp_c: 20.0,
        me_content_kcal_per_kg: 3000.0,
        sell_weight_kg: 130.0,
        stochastic_gain: false,
        rac: None,
    }
}

fn advance(pig: &mut Pig, ctx: &StepContext) -> anyhow::Result<bool> {
    let mut rng = ChaCha12Rng::seed_from_u64(0);
    growth::advance_one_day(pig, ctx, &mut rng)
}

#[test]
fn coefficient_pins_at_20_kg() {
    let w: f64 = 20.0;

    // Base gain and ME intake per kind, pinned against the reference
    // formulas evaluated at w = 20.
    let cases = [
        (PigKind::Gilt, 643.096, 3143.9010043767694),
        (PigKind::Barrow, 543.87, 3124.208109562524),
        (PigKind::Male, 532.18, 3049.5868409373643),
    ];
    for (kind, exp_gain, exp_me) in cases {
        let coef = kind.coefficients();
        let gain = coef.gain_poly[0] + coef.gain_poly[1] * w + coef.gain_poly[2] * w * w;
        assert_close(gain, exp_gain);

        let me = coef.me_max * (1.0 - (-coef.me_rate.exp() * w.powf(coef.me_exp)).exp());
        assert_close(me, exp_me);
    }

    let gilt = PigKind::Gilt.coefficients();
    assert_close(gilt.pd_max, 149.9799);
    assert_close(gilt.bp_at_pd_max_kg, 11.3016);
    let prd = gilt.prd_scale
        * (gilt.prd_poly[0] + gilt.prd_poly[1] * w + gilt.prd_poly[2] * w * w
            + gilt.prd_poly[3] * w * w * w);
    assert_close(prd, 126.34005192000001);

    assert_close(PigKind::Barrow.coefficients().pd_max, 145.3477);
    assert_close(PigKind::Male.coefficients().pd_max, 165.5064);
}

// Golden one-day fixture: gilt at 19.5 kg, T = 20 C, deterministic gain,
// diet ME content 3000 kcal/kg. Values computed once from the reference
// formulas.
#[test]
fn golden_gilt_single_day() {
    let mut pig = test_pig(PigKind::Gilt, 19.5);
    let sellable = advance(&mut pig, &ctx()).expect("failed to advance pig");

    assert!(!sellable);
    assert_close(pig.weight_gain_g, 639.612925);
    assert_close(pig.weight_kg, 20.139612925);
    assert_close(pig.me_intake_kcal, 3160.6136556174274);
    assert_close(pig.protein_deposition_g, 126.5001180858174);
    assert_close(pig.body_protein_kg, 3.6365001180858174);
    assert_close(pig.max_pd_after_decline_g, 102.97914197219919);
    assert_close(pig.ash_kg, 0.6872985223182195);
    assert_close(pig.water_kg, 15.023824325352837);
    assert_close(pig.feed_intake_energy_kg, 1.109375393121717);
    assert_close(pig.feed_intake_kg, 0.7736638261932476);
    assert_close(pig.lct_c, 17.1447645153125);
    assert_close(pig.me_intake_fraction, 1.001844780924936);
    assert_close(pig.min_space_m2, 0.24896676370319487);
    assert_close(pig.max_daily_feed_kg, 1.0554814318001342);
    assert_close(pig.standard_maintenance_kcal, 1193.704683337312);
    assert_close(pig.thermogenesis_kcal, 0.0);
    assert_close(pig.maintenance_kcal, 1193.704683337312);
    assert_close(pig.lipid_deposition_g, 50.08061764563608);
    assert_close(pig.body_lipid_kg, 0.6350806176456361);
    assert_close(pig.empty_body_weight_kg, 19.98270358340251);
    assert_close(pig.gut_fill_kg, 1.8226488056725827);
    assert_close(pig.backfat_mm, -2.379175418202098);
    assert_close(pig.pd_by_energy_g, 2.0511487966721815);

    // First step: deposition is rising, so the ceiling is Pd_max.
    assert_close(pig.maximum_pd_g, 149.9799);
    assert_close(pig.prev_protein_deposition_g, pig.protein_deposition_g);
}

#[test]
fn thermogenesis_below_lower_critical_temperature() {
    let cold = StepContext {
        ambient_temp_c: 5.0,
        ..ctx()
    };
    let mut pig = test_pig(PigKind::Barrow, 30.0);
    advance(&mut pig, &cold).expect("failed to advance pig");

    assert!(cold.ambient_temp_c < pig.lct_c);
    assert!(pig.thermogenesis_kcal > 0.0);
    assert_close(
        pig.maintenance_kcal,
        pig.standard_maintenance_kcal + pig.thermogenesis_kcal,
    );
}

#[test]
fn weight_non_decreasing_over_140_days() {
    // Keep the sell threshold out of reach so no pig is flagged early.
    let ctx = StepContext {
        sell_weight_kg: 10_000.0,
        ..ctx()
    };
    for kind in [PigKind::Gilt, PigKind::Barrow, PigKind::Male] {
        let mut pig = test_pig(kind, 20.0);
        let mut prev = pig.weight_kg;
        for day in 0..140 {
            advance(&mut pig, &ctx)
                .unwrap_or_else(|e| panic!("{:?} failed on day {day}: {e:#}", kind));
            assert!(
                pig.weight_kg >= prev,
                "{kind:?} weight decreased on day {day}: {prev} -> {}",
                pig.weight_kg
            );
            prev = pig.weight_kg;
        }
        assert!(pig.weight_kg > 100.0);
    }
}

#[test]
fn pd_decline_switch() {
    // Past the deposition peak (~64 kg for gilts) Prd falls step over step,
    // so the second update must switch the ceiling to the decline curve.
    let mut pig = test_pig(PigKind::Gilt, 100.0);
    let ctx = StepContext {
        sell_weight_kg: 10_000.0,
        ..ctx()
    };

    advance(&mut pig, &ctx).expect("failed to advance pig");
    assert_close(pig.maximum_pd_g, 149.9799);
    let prd_first = pig.protein_deposition_g;

    advance(&mut pig, &ctx).expect("failed to advance pig");
    assert!(pig.protein_deposition_g <= prd_first);
    assert_close(pig.maximum_pd_g, pig.max_pd_after_decline_g);
    assert!(pig.maximum_pd_g < 149.9799);
}

#[test]
fn pd_stays_at_max_while_rising() {
    let mut pig = test_pig(PigKind::Gilt, 20.0);
    let ctx = ctx();
    for _ in 0..5 {
        advance(&mut pig, &ctx).expect("failed to advance pig");
        assert_close(pig.maximum_pd_g, 149.9799);
    }
}

#[test]
fn sell_threshold_boundary() {
    // Reproduce the engine's post-step weight bit-exactly, so the threshold
    // comparison is exercised at equality.
    let w: f64 = 19.5;
    let coef = PigKind::Gilt.coefficients();
    let gain = coef.gain_poly[0] + coef.gain_poly[1] * w + coef.gain_poly[2] * w * w;
    let w_after = w + gain / 1000.0;

    let crossing = StepContext {
        sell_weight_kg: w_after,
        ..ctx()
    };
    let mut pig = test_pig(PigKind::Gilt, w);
    assert!(advance(&mut pig, &crossing).expect("failed to advance pig"));
    assert_eq!(pig.weight_kg, w_after);

    let above = StepContext {
        sell_weight_kg: w_after + 1e-9,
        ..ctx()
    };
    let mut pig = test_pig(PigKind::Gilt, w);
    assert!(!advance(&mut pig, &above).expect("failed to advance pig"));
}

#[test]
fn male_freezes_final_metrics_at_sell() {
    let ctx = StepContext {
        sell_weight_kg: 100.0,
        ..ctx()
    };
    let mut pig = test_pig(PigKind::Male, 99.9);
    assert!(advance(&mut pig, &ctx).expect("failed to advance pig"));

    let final_weight = pig.final_weight_kg.expect("final weight not frozen");
    assert!(final_weight >= 100.0);
    let pbt = pig.backfat_mm;
    let lean = pig.fat_free_lean_pct.expect("fat-free lean not frozen");
    assert_close(
        lean,
        62.073 + 0.0308 * final_weight - 1.0101 * pbt + 0.00774 * pbt * pbt,
    );
}

#[test]
fn gilt_does_not_compute_fat_free_lean() {
    let ctx = StepContext {
        sell_weight_kg: 100.0,
        ..ctx()
    };
    let mut pig = test_pig(PigKind::Gilt, 99.9);
    assert!(advance(&mut pig, &ctx).expect("failed to advance pig"));
    assert!(pig.final_weight_kg.is_some());
    assert!(pig.fat_free_lean_pct.is_none());
}

#[test]
fn stochastic_gain_stays_within_deviation_bounds() {
    let stochastic = StepContext {
        stochastic_gain: true,
        ..ctx()
    };
    let w: f64 = 19.5;
    let base = -0.0477 * w * w + 8.8503 * w + 485.17;

    let mut rng = ChaCha12Rng::seed_from_u64(7);
    for _ in 0..50 {
        let mut pig = test_pig(PigKind::Gilt, w);
        growth::advance_one_day(&mut pig, &stochastic, &mut rng).expect("failed to advance pig");
        assert!(pig.weight_gain_g > base - 20.0);
        assert!(pig.weight_gain_g < base + 20.0);
    }
}

#[test]
fn domain_precondition_failures() {
    let ctx = ctx();

    assert!(Pig::new(0, PigKind::Gilt, 0.0, Region { start: 0, end: 3 }, (0, 0)).is_err());
    assert!(Pig::new(0, PigKind::Gilt, -5.0, Region { start: 0, end: 3 }, (0, 0)).is_err());

    let mut pig = test_pig(PigKind::Gilt, 50.0);
    pig.weight_kg = 0.0;
    assert!(advance(&mut pig, &ctx).is_err());

    let mut pig = test_pig(PigKind::Gilt, 50.0);
    pig.body_protein_kg = 0.0;
    assert!(advance(&mut pig, &ctx).is_err());

    // Protein mass beyond the maturity mass (2.7182 * 11.3016 kg for gilts)
    // puts the Pd-decline logarithm out of domain.
    let mut pig = test_pig(PigKind::Gilt, 50.0);
    pig.body_protein_kg = 35.0;
    assert!(advance(&mut pig, &ctx).is_err());
}
