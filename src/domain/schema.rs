//! Field schema table: the ordered inputs each classifier was trained on.
//!
//! The order of `fields` IS the feature order of the model. It is checked
//! by the tests below and again against each artifact's declared
//! `feature_names` when the registry loads.

use super::disease::Disease;

/// How a field's raw input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric input, step 1, default 0.
    Numeric,
    /// Free text. Coerced to a number the same way when scored.
    Text,
}

/// One labeled input of a disease form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub help: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn numeric(label: &'static str, help: &'static str, key: &'static str) -> Self {
        Self {
            label,
            help,
            key,
            kind: FieldKind::Numeric,
        }
    }
}

/// Ordered field list for one disease.
#[derive(Debug)]
pub struct DiseaseSchema {
    pub disease: Disease,
    pub fields: &'static [FieldSpec],
}

impl DiseaseSchema {
    /// Number of features the classifier expects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Storage keys in feature order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    /// Index of `key` in feature order.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

const DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::numeric("Number of Pregnancies", "Times pregnant", "Pregnancies"),
    FieldSpec::numeric("Glucose Level", "Glucose level", "Glucose"),
    FieldSpec::numeric("Blood Pressure", "Blood pressure", "BloodPressure"),
    FieldSpec::numeric("Skin Thickness", "Skin thickness", "SkinThickness"),
    FieldSpec::numeric("Insulin Level", "Insulin level", "Insulin"),
    FieldSpec::numeric("BMI", "Body Mass Index", "BMI"),
    FieldSpec::numeric(
        "Diabetes Pedigree Function",
        "Genetic risk",
        "DiabetesPedigreeFunction",
    ),
    FieldSpec::numeric("Age", "Age", "Age"),
];

const HEART_DISEASE_FIELDS: [FieldSpec; 13] = [
    FieldSpec::numeric("Age", "Age", "age"),
    FieldSpec::numeric("Sex (1=male, 0=female)", "Sex", "sex"),
    FieldSpec::numeric("Chest Pain Type (0-3)", "Chest pain type", "cp"),
    FieldSpec::numeric("Resting BP", "Resting blood pressure", "trestbps"),
    FieldSpec::numeric("Serum Cholesterol", "Serum cholesterol", "chol"),
    FieldSpec::numeric(
        "Fasting Blood Sugar > 120mg/dl (1/0)",
        "Fasting blood sugar",
        "fbs",
    ),
    FieldSpec::numeric("Resting ECG (0-2)", "Resting ECG", "restecg"),
    FieldSpec::numeric("Max Heart Rate", "Maximum heart rate", "thalach"),
    FieldSpec::numeric("Exercise Induced Angina (1/0)", "Exercise angina", "exang"),
    FieldSpec::numeric("ST Depression", "ST depression", "oldpeak"),
    FieldSpec::numeric("Slope (0-2)", "Slope", "slope"),
    FieldSpec::numeric("Major Vessels (0-3)", "Major vessels", "ca"),
    FieldSpec::numeric("Thal (0=normal, 1=fixed, 2=reversible)", "Thal", "thal"),
];

// Voice measurements: the MDVP name doubles as the help text.
const PARKINSONS_FIELDS: [FieldSpec; 22] = [
    FieldSpec::numeric("MDVP:Fo(Hz)", "MDVP:Fo(Hz)", "fo"),
    FieldSpec::numeric("MDVP:Fhi(Hz)", "MDVP:Fhi(Hz)", "fhi"),
    FieldSpec::numeric("MDVP:Flo(Hz)", "MDVP:Flo(Hz)", "flo"),
    FieldSpec::numeric("MDVP:Jitter(%)", "MDVP:Jitter(%)", "Jitter_percent"),
    FieldSpec::numeric("MDVP:Jitter(Abs)", "MDVP:Jitter(Abs)", "Jitter_Abs"),
    FieldSpec::numeric("MDVP:RAP", "MDVP:RAP", "RAP"),
    FieldSpec::numeric("MDVP:PPQ", "MDVP:PPQ", "PPQ"),
    FieldSpec::numeric("Jitter:DDP", "Jitter:DDP", "DDP"),
    FieldSpec::numeric("MDVP:Shimmer", "MDVP:Shimmer", "Shimmer"),
    FieldSpec::numeric("MDVP:Shimmer(dB)", "MDVP:Shimmer(dB)", "Shimmer_dB"),
    FieldSpec::numeric("Shimmer:APQ3", "Shimmer:APQ3", "APQ3"),
    FieldSpec::numeric("Shimmer:APQ5", "Shimmer:APQ5", "APQ5"),
    FieldSpec::numeric("MDVP:APQ", "MDVP:APQ", "APQ"),
    FieldSpec::numeric("Shimmer:DDA", "Shimmer:DDA", "DDA"),
    FieldSpec::numeric("NHR", "NHR", "NHR"),
    FieldSpec::numeric("HNR", "HNR", "HNR"),
    FieldSpec::numeric("RPDE", "RPDE", "RPDE"),
    FieldSpec::numeric("DFA", "DFA", "DFA"),
    FieldSpec::numeric("Spread1", "Spread1", "spread1"),
    FieldSpec::numeric("Spread2", "Spread2", "spread2"),
    FieldSpec::numeric("D2", "D2", "D2"),
    FieldSpec::numeric("PPE", "PPE", "PPE"),
];

const LUNG_CANCER_FIELDS: [FieldSpec; 15] = [
    FieldSpec::numeric("Gender (1=Male, 0=Female)", "Gender", "GENDER"),
    FieldSpec::numeric("Age", "Age", "AGE"),
    FieldSpec::numeric("Smoking (1=Yes, 0=No)", "Smoking", "SMOKING"),
    FieldSpec::numeric("Yellow Fingers (1=Yes, 0=No)", "Yellow fingers", "YELLOW_FINGERS"),
    FieldSpec::numeric("Anxiety (1=Yes, 0=No)", "Anxiety", "ANXIETY"),
    FieldSpec::numeric("Peer Pressure (1=Yes, 0=No)", "Peer pressure", "PEER_PRESSURE"),
    FieldSpec::numeric(
        "Chronic Disease (1=Yes, 0=No)",
        "Chronic disease",
        "CHRONIC_DISEASE",
    ),
    FieldSpec::numeric("Fatigue (1=Yes, 0=No)", "Fatigue", "FATIGUE"),
    FieldSpec::numeric("Allergy (1=Yes, 0=No)", "Allergy", "ALLERGY"),
    FieldSpec::numeric("Wheezing (1=Yes, 0=No)", "Wheezing", "WHEEZING"),
    FieldSpec::numeric(
        "Alcohol Consuming (1=Yes, 0=No)",
        "Alcohol consuming",
        "ALCOHOL_CONSUMING",
    ),
    FieldSpec::numeric("Coughing (1=Yes, 0=No)", "Coughing", "COUGHING"),
    FieldSpec::numeric(
        "Shortness Of Breath (1=Yes, 0=No)",
        "Shortness of breath",
        "SHORTNESS_OF_BREATH",
    ),
    FieldSpec::numeric(
        "Swallowing Difficulty (1=Yes, 0=No)",
        "Swallowing difficulty",
        "SWALLOWING_DIFFICULTY",
    ),
    FieldSpec::numeric("Chest Pain (1=Yes, 0=No)", "Chest pain", "CHEST_PAIN"),
];

const HYPO_THYROID_FIELDS: [FieldSpec; 7] = [
    FieldSpec::numeric("Age", "Age", "age"),
    FieldSpec::numeric("Sex (1=Male, 0=Female)", "Sex", "sex"),
    FieldSpec::numeric("On Thyroxine (1=Yes, 0=No)", "On thyroxine", "on_thyroxine"),
    FieldSpec::numeric("TSH Level", "TSH level", "tsh"),
    FieldSpec::numeric("T3 Measured (1=Yes, 0=No)", "T3 measured", "t3_measured"),
    FieldSpec::numeric("T3 Level", "T3 level", "t3"),
    FieldSpec::numeric("TT4 Level", "TT4 level", "tt4"),
];

static DIABETES: DiseaseSchema = DiseaseSchema {
    disease: Disease::Diabetes,
    fields: &DIABETES_FIELDS,
};

static HEART_DISEASE: DiseaseSchema = DiseaseSchema {
    disease: Disease::HeartDisease,
    fields: &HEART_DISEASE_FIELDS,
};

static PARKINSONS: DiseaseSchema = DiseaseSchema {
    disease: Disease::Parkinsons,
    fields: &PARKINSONS_FIELDS,
};

static LUNG_CANCER: DiseaseSchema = DiseaseSchema {
    disease: Disease::LungCancer,
    fields: &LUNG_CANCER_FIELDS,
};

static HYPO_THYROID: DiseaseSchema = DiseaseSchema {
    disease: Disease::HypoThyroid,
    fields: &HYPO_THYROID_FIELDS,
};

/// Static lookup from disease to schema.
#[must_use]
pub fn schema_for(disease: Disease) -> &'static DiseaseSchema {
    match disease {
        Disease::Diabetes => &DIABETES,
        Disease::HeartDisease => &HEART_DISEASE,
        Disease::Parkinsons => &PARKINSONS,
        Disease::LungCancer => &LUNG_CANCER,
        Disease::HypoThyroid => &HYPO_THYROID,
    }
}
