//! Kinematic selections over NanoAOD branches.
//!
//! Cut values follow the trigger-studies convention: jets count above
//! 30 GeV, leptons are accepted to |eta| <= 2.5 with impact-parameter
//! requirements, and the e-mu pair must be opposite-sign with an invariant
//! mass above the low-mass resonance region.

use teff_core::{Error, Result};
use teff_nano::EventBatch;

use crate::mask::reduce_and;

pub const JET_MIN_COUNT: u32 = 2;
pub const JET_PT_MIN: f64 = 30.0;
pub const LEPTON_PT_MIN: f64 = 10.0;
pub const LEPTON_ETA_MAX: f64 = 2.5;
pub const LEPTON_DZ_MAX: f64 = 0.2;
pub const LEPTON_DXY_MAX: f64 = 0.1;
pub const EMU_MASS_MIN: f64 = 20.0;

/// Cartesian four-momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct P4 {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl P4 {
    /// Build from collider coordinates (pt, eta, phi, mass).
    pub fn from_ptetaphim(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let e = (mass * mass + (pt * eta.cosh()).powi(2)).sqrt();
        Self { px, py, pz, e }
    }

    /// Invariant mass, clamped against FP cancellation below zero.
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz;
        m2.max(0.0).sqrt()
    }
}

impl std::ops::Add for P4 {
    type Output = P4;

    fn add(self, rhs: P4) -> P4 {
        P4 { px: self.px + rhs.px, py: self.py + rhs.py, pz: self.pz + rhs.pz, e: self.e + rhs.e }
    }
}

/// At least two jets, at least one above the pt threshold.
pub fn jet_selection(batch: &EventBatch) -> Result<Vec<bool>> {
    let n_jet: Vec<bool> = batch.counts("nJet")?.iter().map(|&n| n >= JET_MIN_COUNT).collect();
    let hard_jet = batch.jagged("Jet_pt")?.any(|pt| pt > JET_PT_MIN);
    reduce_and(&[&n_jet, &hard_jet])
}

/// Exactly one lepton of the given collection, passing the quality cuts.
fn single_lepton(batch: &EventBatch, prefix: &str) -> Result<Vec<bool>> {
    let exactly_one: Vec<bool> =
        batch.counts(&format!("n{prefix}"))?.iter().map(|&n| n == 1).collect();
    let pt = batch.jagged(&format!("{prefix}_pt"))?.any(|v| v >= LEPTON_PT_MIN);
    let eta = batch.jagged(&format!("{prefix}_eta"))?.any(|v| v.abs() <= LEPTON_ETA_MAX);
    let dz = batch.jagged(&format!("{prefix}_dz"))?.any(|v| v < LEPTON_DZ_MAX);
    let dxy = batch.jagged(&format!("{prefix}_dxy"))?.any(|v| v < LEPTON_DXY_MAX);
    reduce_and(&[&exactly_one, &pt, &eta, &dz, &dxy])
}

/// ttbar-enriched selection: one good electron, one good muon,
/// opposite-sign, m(e,mu) above [`EMU_MASS_MIN`], plus the jet selection.
pub fn ttbar_selection(batch: &EventBatch) -> Result<Vec<bool>> {
    let electron = single_lepton(batch, "Electron")?;
    let muon = single_lepton(batch, "Muon")?;
    let pair = reduce_and(&[&electron, &muon])?;

    let e_charge = batch.jagged("Electron_charge")?;
    let m_charge = batch.jagged("Muon_charge")?;
    let e_pt = batch.jagged("Electron_pt")?;
    let e_eta = batch.jagged("Electron_eta")?;
    let e_phi = batch.jagged("Electron_phi")?;
    let e_mass = batch.jagged("Electron_mass")?;
    let m_pt = batch.jagged("Muon_pt")?;
    let m_eta = batch.jagged("Muon_eta")?;
    let m_phi = batch.jagged("Muon_phi")?;
    let m_mass = batch.jagged("Muon_mass")?;

    // Charge balance and pair mass use the leading lepton of each
    // collection; the pair mask above guarantees it exists.
    let mut mask = Vec::with_capacity(batch.n_events());
    for i in 0..batch.n_events() {
        if !pair[i] {
            mask.push(false);
            continue;
        }
        let lead = (
            e_charge.get(i, 0),
            m_charge.get(i, 0),
            e_pt.get(i, 0),
            e_eta.get(i, 0),
            e_phi.get(i, 0),
            e_mass.get(i, 0),
            m_pt.get(i, 0),
            m_eta.get(i, 0),
            m_phi.get(i, 0),
            m_mass.get(i, 0),
        );
        let (
            Some(qe),
            Some(qm),
            Some(pt_e),
            Some(eta_e),
            Some(phi_e),
            Some(mass_e),
            Some(pt_m),
            Some(eta_m),
            Some(phi_m),
            Some(mass_m),
        ) = lead
        else {
            mask.push(false);
            continue;
        };

        let opposite_sign = qe + qm == 0.0;
        let electron = P4::from_ptetaphim(pt_e, eta_e, phi_e, mass_e);
        let muon = P4::from_ptetaphim(pt_m, eta_m, phi_m, mass_m);
        let pair_mass = (electron + muon).mass();
        mask.push(opposite_sign && pair_mass > EMU_MASS_MIN);
    }

    let jets = jet_selection(batch)?;
    reduce_and(&[&mask, &jets])
}

/// QCD-enriched selection: the high-HT path plus the jet selection.
pub fn qcd_selection(batch: &EventBatch, path: &str) -> Result<Vec<bool>> {
    let fired = batch.flags(path)?;
    let jets = jet_selection(batch)?;
    reduce_and(&[fired, &jets])
}

/// Raw trigger-path flag as an owned mask.
pub fn trigger_path_selection(batch: &EventBatch, path: &str) -> Result<Vec<bool>> {
    if path.is_empty() {
        return Err(Error::Validation("trigger path name must not be empty".into()));
    }
    Ok(batch.flags(path)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use teff_nano::JaggedCol;

    /// One synthetic event: leptons as (pt, eta, phi, mass, dz, dxy, charge).
    #[derive(Clone, Default)]
    struct Ev {
        electrons: Vec<[f64; 7]>,
        muons: Vec<[f64; 7]>,
        jets: Vec<f64>,
    }

    fn good_event() -> Ev {
        Ev {
            electrons: vec![[35.0, 0.5, 0.0, 0.000511, 0.01, 0.01, 1.0]],
            muons: vec![[30.0, -0.4, 2.5, 0.10566, 0.01, 0.01, -1.0]],
            jets: vec![45.0, 32.0],
        }
    }

    fn lepton_cols(prefix: &str, rows: &[&Vec<[f64; 7]>]) -> Vec<(String, JaggedCol)> {
        let field = |k: usize| {
            let cols: Vec<Vec<f64>> =
                rows.iter().map(|ls| ls.iter().map(|l| l[k]).collect()).collect();
            JaggedCol::from_rows(&cols)
        };
        vec![
            (format!("{prefix}_pt"), field(0)),
            (format!("{prefix}_eta"), field(1)),
            (format!("{prefix}_phi"), field(2)),
            (format!("{prefix}_mass"), field(3)),
            (format!("{prefix}_dz"), field(4)),
            (format!("{prefix}_dxy"), field(5)),
            (format!("{prefix}_charge"), field(6)),
        ]
    }

    fn batch_from(events: &[Ev]) -> EventBatch {
        let n = events.len();
        let counts = vec![
            ("nElectron".to_string(), events.iter().map(|e| e.electrons.len() as u32).collect()),
            ("nMuon".to_string(), events.iter().map(|e| e.muons.len() as u32).collect()),
            ("nJet".to_string(), events.iter().map(|e| e.jets.len() as u32).collect()),
        ];
        let mut jagged = Vec::new();
        let e_rows: Vec<&Vec<[f64; 7]>> = events.iter().map(|e| &e.electrons).collect();
        let m_rows: Vec<&Vec<[f64; 7]>> = events.iter().map(|e| &e.muons).collect();
        jagged.extend(lepton_cols("Electron", &e_rows));
        jagged.extend(lepton_cols("Muon", &m_rows));
        jagged.push((
            "Jet_pt".to_string(),
            JaggedCol::from_rows(&events.iter().map(|e| e.jets.clone()).collect::<Vec<_>>()),
        ));
        EventBatch::from_columns(n, [], counts, jagged).unwrap()
    }

    #[test]
    fn massless_back_to_back_pair() {
        let a = P4::from_ptetaphim(50.0, 0.0, 0.0, 0.0);
        let b = P4::from_ptetaphim(50.0, 0.0, std::f64::consts::PI, 0.0);
        assert_relative_eq!((a + b).mass(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn pair_mass_matches_closed_form() {
        // m^2 = 2 pt1 pt2 (cosh(d_eta) - cos(d_phi)) for massless legs.
        let (pt1, eta1, phi1) = (35.0, 0.5, 0.0);
        let (pt2, eta2, phi2) = (30.0, -0.4, 2.5);
        let d_eta: f64 = eta1 - eta2;
        let d_phi: f64 = phi1 - phi2;
        let expected = (2.0 * pt1 * pt2 * (d_eta.cosh() - d_phi.cos())).sqrt();
        let a = P4::from_ptetaphim(pt1, eta1, phi1, 0.0);
        let b = P4::from_ptetaphim(pt2, eta2, phi2, 0.0);
        assert_relative_eq!((a + b).mass(), expected, max_relative = 1e-12);
    }

    #[test]
    fn jet_selection_requires_two_jets_and_one_hard() {
        let mut soft = good_event();
        soft.jets = vec![25.0, 20.0]; // two jets, none above 30
        let mut single = good_event();
        single.jets = vec![80.0]; // hard but alone
        let batch = batch_from(&[good_event(), soft, single]);
        assert_eq!(jet_selection(&batch).unwrap(), vec![true, false, false]);
    }

    #[test]
    fn jet_selection_monotone_under_added_jet() {
        let base = good_event();
        let mut more = good_event();
        more.jets.push(55.0);
        let batch = batch_from(&[base, more]);
        let mask = jet_selection(&batch).unwrap();
        // Adding a passing jet never turns a passing event into a failing one.
        assert!(mask[0]);
        assert!(mask[1]);
    }

    #[test]
    fn ttbar_accepts_the_good_event() {
        let batch = batch_from(&[good_event()]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![true]);
    }

    #[test]
    fn ttbar_rejects_two_electrons() {
        let mut ev = good_event();
        ev.electrons.push([40.0, -0.2, 1.0, 0.000511, 0.01, 0.01, -1.0]);
        let batch = batch_from(&[ev]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![false]);
    }

    #[test]
    fn ttbar_rejects_same_sign_pair() {
        let mut ev = good_event();
        ev.muons[0][6] = 1.0;
        let batch = batch_from(&[ev]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![false]);
    }

    #[test]
    fn ttbar_rejects_low_mass_pair() {
        let mut ev = good_event();
        // Nearly collinear soft pair: m well below 20.
        ev.electrons[0] = [10.0, 0.0, 0.0, 0.000511, 0.01, 0.01, 1.0];
        ev.muons[0] = [10.0, 0.0, 0.1, 0.10566, 0.01, 0.01, -1.0];
        let batch = batch_from(&[ev]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![false]);
    }

    #[test]
    fn ttbar_rejects_bad_impact_parameters() {
        let mut far_dz = good_event();
        far_dz.electrons[0][4] = 0.5;
        let mut far_dxy = good_event();
        far_dxy.muons[0][5] = 0.3;
        let batch = batch_from(&[good_event(), far_dz, far_dxy]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![true, false, false]);
    }

    #[test]
    fn ttbar_requires_the_jet_selection() {
        let mut no_jets = good_event();
        no_jets.jets.clear();
        let batch = batch_from(&[no_jets]);
        assert_eq!(ttbar_selection(&batch).unwrap(), vec![false]);
    }

    #[test]
    fn qcd_is_path_and_jets() {
        let events = [good_event(), good_event()];
        let mut batch = batch_from(&events);
        batch.insert_flags("HLT_PFHT1050".to_string(), vec![true, false]).unwrap();
        assert_eq!(qcd_selection(&batch, "HLT_PFHT1050").unwrap(), vec![true, false]);
    }

    #[test]
    fn trigger_path_passes_flags_through() {
        let mut batch = batch_from(&[good_event(), good_event()]);
        batch.insert_flags("HLT_X".to_string(), vec![false, true]).unwrap();
        assert_eq!(trigger_path_selection(&batch, "HLT_X").unwrap(), vec![false, true]);
        assert!(trigger_path_selection(&batch, "").is_err());
        assert!(trigger_path_selection(&batch, "HLT_Y").is_err());
    }
}
