use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One output row: a residue, its contact-set tallies and the null-model
/// statistics. Rows are unified across the transcript- and protein-centric
/// drivers; columns a driver cannot resolve stay at their defaults (`NaN`
/// for numbers, `NA` for structural annotations) instead of changing the
/// header shape.
#[derive(Clone, Debug)]
pub struct CosmisRecord {
    pub uniprot_id: String,
    pub enst_id: String,
    pub uniprot_pos: usize,
    pub uniprot_aa: char,
    pub pdb_pos: Option<i64>,
    pub pdb_aa: Option<char>,
    pub pdb_id: Option<String>,
    pub chain_id: Option<String>,
    pub seq_separations: String,
    pub num_contacts: usize,
    pub syn_var_sites: f64,
    pub total_syn_sites: f64,
    pub mis_var_sites: f64,
    pub total_mis_sites: f64,
    pub cs_syn_poss: f64,
    pub cs_mis_poss: f64,
    pub cs_gc_content: f64,
    pub cs_syn_prob: f64,
    pub cs_syn_obs: f64,
    pub cs_mis_prob: f64,
    pub cs_mis_obs: f64,
    pub mis_pmt_mean: f64,
    pub mis_pmt_sd: f64,
    pub mis_p_value: f64,
    pub syn_pmt_mean: f64,
    pub syn_pmt_sd: f64,
    pub syn_p_value: f64,
    pub enst_syn_obs: u32,
    pub enst_mis_obs: u32,
    pub enst_syn_exp: f64,
    pub enst_mis_exp: f64,
    pub phylop_score: f64,
    pub uniprot_length: usize,
}

impl CosmisRecord {
    /// A row whose contact-set block could not be computed (the residue is
    /// absent from the structure or disagrees with the peptide). Identity
    /// and transcript-wide columns stay informative; everything else is NaN.
    #[allow(clippy::too_many_arguments)]
    pub fn unresolved(
        uniprot_id: String,
        enst_id: String,
        uniprot_pos: usize,
        uniprot_aa: char,
        enst_syn_obs: u32,
        enst_mis_obs: u32,
        uniprot_length: usize,
    ) -> Self {
        CosmisRecord {
            uniprot_id,
            enst_id,
            uniprot_pos,
            uniprot_aa,
            pdb_pos: None,
            pdb_aa: None,
            pdb_id: None,
            chain_id: None,
            seq_separations: String::new(),
            num_contacts: 0,
            syn_var_sites: f64::NAN,
            total_syn_sites: f64::NAN,
            mis_var_sites: f64::NAN,
            total_mis_sites: f64::NAN,
            cs_syn_poss: f64::NAN,
            cs_mis_poss: f64::NAN,
            cs_gc_content: f64::NAN,
            cs_syn_prob: f64::NAN,
            cs_syn_obs: f64::NAN,
            cs_mis_prob: f64::NAN,
            cs_mis_obs: f64::NAN,
            mis_pmt_mean: f64::NAN,
            mis_pmt_sd: f64::NAN,
            mis_p_value: f64::NAN,
            syn_pmt_mean: f64::NAN,
            syn_pmt_sd: f64::NAN,
            syn_p_value: f64::NAN,
            enst_syn_obs,
            enst_mis_obs,
            enst_syn_exp: f64::NAN,
            enst_mis_exp: f64::NAN,
            phylop_score: f64::NAN,
            uniprot_length,
        }
    }
}

// Fixed decimal/scientific formats keep the output diffable between runs;
// `{:.3}` and `{:.3e}` both render f64::NAN as "NaN".
impl Serialize for CosmisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let na = |x: &Option<String>| x.clone().unwrap_or_else(|| "NA".to_string());

        let mut state = serializer.serialize_struct("CosmisRecord", 33)?;
        state.serialize_field("uniprot_id", &self.uniprot_id)?;
        state.serialize_field("enst_id", &self.enst_id)?;
        state.serialize_field("uniprot_pos", &self.uniprot_pos)?;
        state.serialize_field("uniprot_aa", &self.uniprot_aa)?;
        state.serialize_field("pdb_pos", &na(&self.pdb_pos.map(|x| x.to_string())))?;
        state.serialize_field("pdb_aa", &na(&self.pdb_aa.map(String::from)))?;
        state.serialize_field("pdb_id", &na(&self.pdb_id))?;
        state.serialize_field("chain_id", &na(&self.chain_id))?;
        state.serialize_field("seq_separations", &self.seq_separations)?;
        state.serialize_field("num_contacts", &self.num_contacts)?;
        state.serialize_field("syn_var_sites", &format!("{:.0}", self.syn_var_sites))?;
        state.serialize_field("total_syn_sites", &format!("{:.3}", self.total_syn_sites))?;
        state.serialize_field("mis_var_sites", &format!("{:.0}", self.mis_var_sites))?;
        state.serialize_field("total_mis_sites", &format!("{:.3}", self.total_mis_sites))?;
        state.serialize_field("cs_syn_poss", &format!("{:.0}", self.cs_syn_poss))?;
        state.serialize_field("cs_mis_poss", &format!("{:.0}", self.cs_mis_poss))?;
        state.serialize_field("cs_gc_content", &format!("{:.3}", self.cs_gc_content))?;
        state.serialize_field("cs_syn_prob", &format!("{:.3e}", self.cs_syn_prob))?;
        state.serialize_field("cs_syn_obs", &format!("{:.0}", self.cs_syn_obs))?;
        state.serialize_field("cs_mis_prob", &format!("{:.3e}", self.cs_mis_prob))?;
        state.serialize_field("cs_mis_obs", &format!("{:.0}", self.cs_mis_obs))?;
        state.serialize_field("mis_pmt_mean", &format!("{:.3}", self.mis_pmt_mean))?;
        state.serialize_field("mis_pmt_sd", &format!("{:.3}", self.mis_pmt_sd))?;
        state.serialize_field("mis_p_value", &format!("{:.3e}", self.mis_p_value))?;
        state.serialize_field("syn_pmt_mean", &format!("{:.3}", self.syn_pmt_mean))?;
        state.serialize_field("syn_pmt_sd", &format!("{:.3}", self.syn_pmt_sd))?;
        state.serialize_field("syn_p_value", &format!("{:.3e}", self.syn_p_value))?;
        state.serialize_field("enst_syn_obs", &self.enst_syn_obs)?;
        state.serialize_field("enst_mis_obs", &self.enst_mis_obs)?;
        state.serialize_field("enst_syn_exp", &format!("{:.3}", self.enst_syn_exp))?;
        state.serialize_field("enst_mis_exp", &format!("{:.3}", self.enst_mis_exp))?;
        state.serialize_field("phylop_score", &format!("{:.3}", self.phylop_score))?;
        state.serialize_field("uniprot_length", &self.uniprot_length)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_tsv(record: &CosmisRecord) -> String {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(vec![]);
        writer.serialize(record).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn unresolved_row_renders_nan_and_na() {
        let record = CosmisRecord::unresolved("P12345".into(), "ENST01".into(), 3, 'W', 10, 25, 100);
        let tsv = to_tsv(&record);
        let mut lines = tsv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("uniprot_id\tenst_id\tuniprot_pos\tuniprot_aa\tpdb_pos"));
        assert_eq!(header.split('\t').count(), 33);

        let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(row.len(), 33);
        assert_eq!(&row[..4], &["P12345", "ENST01", "3", "W"]);
        assert_eq!(&row[4..8], &["NA", "NA", "NA", "NA"]);
        assert_eq!(row[23], "NaN"); // mis_p_value
        assert_eq!(&row[27..29], &["10", "25"]);
        assert_eq!(row[32], "100");
    }

    #[test]
    fn resolved_row_uses_fixed_formats() {
        let mut record = CosmisRecord::unresolved("P12345".into(), "ENST01".into(), 3, 'W', 1, 2, 10);
        record.pdb_pos = Some(27);
        record.pdb_aa = Some('W');
        record.pdb_id = Some("1abc".into());
        record.chain_id = Some("A".into());
        record.cs_mis_prob = 1.25e-7;
        record.mis_p_value = 0.05;
        record.mis_pmt_mean = 2.71828;
        let tsv = to_tsv(&record);
        let row: Vec<&str> = tsv.lines().nth(1).unwrap().split('\t').collect();
        assert_eq!(&row[4..8], &["27", "W", "1abc", "A"]);
        assert_eq!(row[19], "1.250e-7"); // cs_mis_prob
        assert_eq!(row[21], "2.718"); // mis_pmt_mean
        assert_eq!(row[23], "5.000e-2"); // mis_p_value
    }
}
