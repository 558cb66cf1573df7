//! Propiedades de los artifacts generados (macros y descriptores).

use mc_core::{MacroBuilder, RunKey, SubmitDescriptorBuilder};
use mc_domain::{Confinement, EnergyState, Excitation, Isotope, IsotopeResolver, SeedPair};

fn count_prefix(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}

fn render_for(isotope: &Isotope, seeds: SeedPair, events: u64) -> String {
    let conf = Confinement::from_position("0.5 0.25 1.5", "CYGNO_gas").unwrap();
    MacroBuilder::ion(isotope, &conf, 1_700_000_123).seeds(seeds)
                                                    .num_events(events)
                                                    .build()
                                                    .unwrap()
                                                    .render()
}

#[test]
fn ion_macro_has_exactly_one_of_each_key_directive() {
    let cases = [(Isotope::new("Cs137", 55, 137, EnergyState::Ground, Excitation::Ground), 1u32, 2u32, 1000u64),
                 (Isotope::new("Ag108m", 47, 108, EnergyState::Metastable("m".into()), Excitation::Tabulated(109.466)),
                  4_294_967_294,
                  0,
                  1),
                 (Isotope::new("K40", 19, 40, EnergyState::Ground, Excitation::Ground), 77, 38, 123_456_789)];
    for (iso, s1, s2, n) in cases {
        let text = render_for(&iso, SeedPair { seed1: s1, seed2: s2 }, n);
        assert_eq!(count_prefix(&text, "/gps/particle ion"), 1);
        assert_eq!(count_prefix(&text, "/gps/ion "), 1);
        assert!(text.contains(&format!("/gps/ion {} {} 0 {}\n", iso.z(), iso.a(), iso.excitation_kev())));
        assert_eq!(count_prefix(&text, "/gps/pos/confine "), 1);
        assert!(text.contains("/gps/pos/confine CYGNO_gas\n"));
        assert_eq!(count_prefix(&text, "/random/setSeeds "), 1);
        assert!(text.contains(&format!("/random/setSeeds {s1} {s2}\n")));
        assert_eq!(count_prefix(&text, "/run/beamOn "), 1);
        assert!(text.contains(&format!("/run/beamOn {n}\n")));
    }
}

#[test]
fn decay_chain_restriction_only_for_u238() {
    let resolver = IsotopeResolver::new().unwrap();
    let seeds = SeedPair { seed1: 1, seed2: 2 };
    for symbol in ["U238", "U235", "Th232", "Cs137", "Ag108m", "Pa234m"] {
        let iso = resolver.resolve(symbol).unwrap();
        let text = render_for(&iso, seeds, 10);
        let has_limits = text.contains("/grdm/nucleusLimits");
        assert_eq!(has_limits, symbol == "U238", "{symbol}");
        if has_limits {
            assert!(text.find("/grdm/nucleusLimits").unwrap() < text.find("/run/initialize").unwrap());
        }
    }
}

#[test]
fn descriptor_references_single_macro_and_output() {
    let key = RunKey::ion("Cs137", "vessel", 1_700_000_000);
    let text = SubmitDescriptorBuilder::new(key).build().unwrap().render();
    let args: Vec<&str> = text.lines().filter(|l| l.starts_with("arguments")).collect();
    assert_eq!(args, vec!["arguments  = Cs137_vessel_1700000000.mac"]);
    let outputs: Vec<&str> = text.lines().filter(|l| l.starts_with("transfer_output_files")).collect();
    assert_eq!(outputs, vec!["transfer_output_files  = Cs137_vessel_1700000000.root"]);
    assert_eq!(text.matches(".mac").count(), 1);
    assert_eq!(text.matches(".root").count(), 1);
}

#[test]
fn written_artifacts_share_the_run_key() {
    let tmp = tempfile::tempdir().unwrap();
    let iso = Isotope::new("Cs137", 55, 137, EnergyState::Ground, Excitation::Ground);
    let conf = Confinement::from_position("1 1 1", "vessel").unwrap();
    let spec = MacroBuilder::ion(&iso, &conf, 1_700_000_000).seeds(SeedPair { seed1: 3, seed2: 1 })
                                                            .num_events(1000)
                                                            .build()
                                                            .unwrap();
    let mac = spec.write(&tmp.path().join("macros")).unwrap();
    let sub = SubmitDescriptorBuilder::new(spec.key().clone()).build()
                                                            .unwrap()
                                                            .write(&tmp.path().join("submit"))
                                                            .unwrap();
    assert!(mac.ends_with("Cs137_vessel_1700000000.mac"));
    assert!(sub.ends_with("Cs137_vessel_1700000000.submit"));
    let mac_text = std::fs::read_to_string(mac).unwrap();
    assert!(mac_text.contains("/CYGNO/outfile Cs137_vessel_1700000000.root"));
}
