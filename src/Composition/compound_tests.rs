/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Composition::compound::{
        ChemEntity, Compound, CompositionError, MoleculeComponent,
    };
    use crate::Composition::periodic_table::{Element, PERIODIC_TABLE};
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_molecule_component() {
        let mc = MoleculeComponent::new(2, Element::H).unwrap();
        assert_eq!(mc.count(), 2);
        assert_eq!(mc.element(), Element::H);
        assert_eq!(mc.atom_count(Element::H), 2);
        assert_eq!(mc.atom_count(Element::O), 0);
        assert_eq!(mc.elements(), BTreeSet::from([Element::H]));
    }

    #[test]
    fn test_zero_atom_count_rejected() {
        let err = MoleculeComponent::new(0, Element::Fe).unwrap_err();
        assert_eq!(err, CompositionError::ZeroAtomCount(Element::Fe));
    }

    #[test]
    fn test_compound_from_components() {
        let water = Compound::from_components(&[
            MoleculeComponent::new(2, Element::H).unwrap(),
            MoleculeComponent::new(1, Element::O).unwrap(),
        ])
        .unwrap();
        assert_eq!(water.atom_count(Element::H), 2);
        assert_eq!(water.atom_count(Element::O), 1);
        assert_eq!(water.atom_count(Element::C), 0);
        assert_eq!(water.elements(), BTreeSet::from([Element::H, Element::O]));
    }

    #[test]
    fn test_duplicate_element_rejected() {
        // same element twice, even with different counts, must not be merged
        // or dropped silently
        let err = Compound::from_components(&[
            MoleculeComponent::new(2, Element::H).unwrap(),
            MoleculeComponent::new(4, Element::H).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, CompositionError::DuplicateElement(Element::H));

        let err = Compound::from_components(&[
            MoleculeComponent::new(3, Element::O).unwrap(),
            MoleculeComponent::new(3, Element::O).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(err, CompositionError::DuplicateElement(Element::O));
    }

    #[test]
    fn test_builder_aggregates_counts() {
        let compound = Compound::builder()
            .add(Element::H, 12)
            .add(Element::C, 6)
            .add(Element::H, 6)
            .build();
        assert_eq!(compound.atom_count(Element::H), 18);
        assert_eq!(compound.atom_count(Element::C), 6);
        // zero count leaves the composition unchanged
        let compound = Compound::builder().add(Element::N, 0).build();
        assert_eq!(compound.atom_count(Element::N), 0);
        assert!(compound.elements().is_empty());
    }

    #[test]
    fn test_builder_from_components() {
        let compound = Compound::builder()
            .add_component(MoleculeComponent::new(2, Element::H).unwrap())
            .add_component(MoleculeComponent::new(2, Element::H).unwrap())
            .add_component(MoleculeComponent::new(1, Element::O).unwrap())
            .build();
        assert_eq!(compound.atom_count(Element::H), 4);
        assert_eq!(compound.atom_count(Element::O), 1);
    }

    #[test]
    fn test_equality_is_composition_equality() {
        let from_components = Compound::from_components(&[
            MoleculeComponent::new(2, Element::H).unwrap(),
            MoleculeComponent::new(1, Element::O).unwrap(),
        ])
        .unwrap();
        let from_builder = Compound::builder()
            .add(Element::O, 1)
            .add(Element::H, 2)
            .build();
        assert_eq!(from_components, from_builder);
    }

    #[test]
    fn test_from_symbols() {
        let glucose = Compound::from_symbols(&[("C", 6), ("H", 12), ("O", 6)]).unwrap();
        assert_eq!(glucose.atom_count(Element::C), 6);
        assert_eq!(glucose.atom_count(Element::H), 12);
        assert_eq!(glucose.atom_count(Element::O), 6);
        // repeated symbols are aggregated
        let compound = Compound::from_symbols(&[("H", 2), ("H", 2), ("O", 2)]).unwrap();
        assert_eq!(compound.atom_count(Element::H), 4);

        let err = Compound::from_symbols(&[("Xx", 1)]).unwrap_err();
        assert_eq!(err, CompositionError::UnknownElement("Xx".to_string()));
        let err = Compound::from_symbols(&[("O", 0)]).unwrap_err();
        assert_eq!(err, CompositionError::ZeroAtomCount(Element::O));
    }

    #[test]
    fn test_symbol_round_trip() {
        for elm in PERIODIC_TABLE {
            assert_eq!(Element::from_symbol(elm.symbol()).unwrap(), *elm);
        }
        assert!(Element::from_symbol("Qq").is_err());
    }

    #[test]
    fn test_molar_mass() {
        let water = Compound::from_symbols(&[("H", 2), ("O", 1)]).unwrap();
        assert_relative_eq!(water.molar_mass(), 18.015, epsilon = 1e-3);
        let salt = Compound::from_symbols(&[("Na", 1), ("Cl", 1)]).unwrap();
        assert_relative_eq!(salt.molar_mass(), 58.44, epsilon = 1e-3);
        let empty = Compound::builder().build();
        assert_relative_eq!(empty.molar_mass(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hill_order_formula() {
        let methane = Compound::from_symbols(&[("C", 1), ("H", 4)]).unwrap();
        assert_eq!(methane.to_string(), "CH4");
        let glucose = Compound::from_symbols(&[("O", 6), ("C", 6), ("H", 12)]).unwrap();
        assert_eq!(glucose.to_string(), "C6H12O6");
        // no carbon: plain alphabetical order of symbols
        let water = Compound::from_symbols(&[("O", 1), ("H", 2)]).unwrap();
        assert_eq!(water.to_string(), "H2O");
        let salt = Compound::from_symbols(&[("Na", 1), ("Cl", 1)]).unwrap();
        assert_eq!(salt.to_string(), "ClNa");
        let ethanol = Compound::from_symbols(&[("C", 2), ("H", 6), ("O", 1)]).unwrap();
        assert_eq!(ethanol.to_string(), "C2H6O");
    }

    #[test]
    fn test_compound_serde_round_trip() {
        let water = Compound::from_symbols(&[("H", 2), ("O", 1)]).unwrap();
        let json = serde_json::to_string(&water).unwrap();
        println!("serialized compound: {}", json);
        let back: Compound = serde_json::from_str(&json).unwrap();
        assert_eq!(water, back);
    }

    #[test]
    fn test_atomic_masses() {
        assert_relative_eq!(Element::H.atomic_mass(), 1.008, epsilon = 1e-6);
        assert_relative_eq!(Element::Fe.atomic_mass(), 55.845, epsilon = 1e-6);
        assert_relative_eq!(Element::Ru.atomic_mass(), 101.07, epsilon = 1e-6);
    }
}
