use mc_domain::{Confinement, EnergyState, Excitation, IsotopeResolver, METASTABLE_ENERGIES};

#[test]
fn test_every_tabulated_metastable_resolves_to_table_value() {
    let resolver = IsotopeResolver::new().unwrap();
    for (isotope, state, kev) in METASTABLE_ENERGIES.entries() {
        let iso = resolver.resolve(isotope).unwrap();
        assert_eq!(iso.state(), &EnergyState::Metastable(state.to_string()), "{isotope}");
        assert_eq!(iso.excitation(), Excitation::Tabulated(kev), "{isotope}");
        assert_eq!(iso.excitation_kev(), kev);
    }
}

#[test]
fn test_untabulated_metastable_uses_documented_fallback() {
    let resolver = IsotopeResolver::new().unwrap();
    for symbol in ["Sn119m", "Nb93m", "Hf178n"] {
        let iso = resolver.resolve(symbol).unwrap();
        assert_eq!(iso.excitation(), Excitation::MissingOverride, "{symbol}");
        assert_eq!(iso.excitation_kev(), 0.0);
    }
}

#[test]
fn test_ground_state_isotopes() {
    let resolver = IsotopeResolver::new().unwrap();
    let cs = resolver.resolve("Cs137").unwrap();
    assert_eq!((cs.z(), cs.a()), (55, 137));
    assert_eq!(cs.excitation(), Excitation::Ground);
    assert_eq!(cs.symbol(), "Cs137");

    let u = resolver.resolve("U238").unwrap();
    assert_eq!((u.z(), u.a()), (92, 238));
    assert!(u.is_ground());
}

#[test]
fn test_alternative_spelling_hits_table() {
    let resolver = IsotopeResolver::new().unwrap();
    let ag = resolver.resolve("Ag-108m").unwrap();
    assert_eq!(ag.excitation_kev(), 109.466);
    // el símbolo original se conserva para nombrar artifacts
    assert_eq!(ag.symbol(), "Ag-108m");
}

#[test]
fn test_confinement_roundtrip_from_cli_position() {
    let c = Confinement::from_position("1 1 1", "vessel").unwrap();
    assert_eq!(c.volume(), "vessel");
    assert_eq!(c.half_x(), 1.0);
}
