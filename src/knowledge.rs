//! Static disease knowledge base.
//!
//! One immutable table covering the seven HAM10000 lesion classes the
//! prediction service is trained on: full name, plain-language description,
//! and three ordered recommendation lists (prevention, medicine, diet).
//! Loaded once as `&'static` data, read-only for the process lifetime.

use serde::{Deserialize, Serialize};

/// Closed set of lesion class codes, in the fixed enumeration order the
/// prediction service reports them (and the chart displays them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseCode {
    Akiec,
    Bcc,
    Bkl,
    Df,
    Nv,
    Vasc,
    Mel,
}

impl DiseaseCode {
    /// All codes in fixed enumeration order. Chart labels and tie-breaking
    /// both rely on this order being stable.
    pub const ALL: [DiseaseCode; 7] = [
        DiseaseCode::Akiec,
        DiseaseCode::Bcc,
        DiseaseCode::Bkl,
        DiseaseCode::Df,
        DiseaseCode::Nv,
        DiseaseCode::Vasc,
        DiseaseCode::Mel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Akiec => "akiec",
            Self::Bcc => "bcc",
            Self::Bkl => "bkl",
            Self::Df => "df",
            Self::Nv => "nv",
            Self::Vasc => "vasc",
            Self::Mel => "mel",
        }
    }
}

impl std::str::FromStr for DiseaseCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "akiec" => Ok(Self::Akiec),
            "bcc" => Ok(Self::Bcc),
            "bkl" => Ok(Self::Bkl),
            "df" => Ok(Self::Df),
            "nv" => Ok(Self::Nv),
            "vasc" => Ok(Self::Vasc),
            "mel" => Ok(Self::Mel),
            _ => Err(UnknownCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for DiseaseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code outside the fixed seven-class set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown disease code: {0}")]
pub struct UnknownCode(pub String);

/// Per-code entry of the knowledge base. All fields are static text.
pub struct DiseaseInfo {
    pub full_name: &'static str,
    pub description: &'static str,
    pub prevention: &'static [&'static str],
    pub medicine: &'static [&'static str],
    pub diet: &'static [&'static str],
}

/// Serializable projection of a knowledge-base entry for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseInfoView {
    pub code: DiseaseCode,
    pub full_name: String,
    pub description: String,
    pub prevention: Vec<String>,
    pub medicine: Vec<String>,
    pub diet: Vec<String>,
}

impl DiseaseInfoView {
    pub fn for_code(code: DiseaseCode) -> Self {
        let info = lookup(code);
        Self {
            code,
            full_name: info.full_name.to_string(),
            description: info.description.to_string(),
            prevention: info.prevention.iter().map(|s| s.to_string()).collect(),
            medicine: info.medicine.iter().map(|s| s.to_string()).collect(),
            diet: info.diet.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Look up the static entry for a code. Total over the closed set.
pub fn lookup(code: DiseaseCode) -> &'static DiseaseInfo {
    match code {
        DiseaseCode::Akiec => &AKIEC,
        DiseaseCode::Bcc => &BCC,
        DiseaseCode::Bkl => &BKL,
        DiseaseCode::Df => &DF,
        DiseaseCode::Nv => &NV,
        DiseaseCode::Vasc => &VASC,
        DiseaseCode::Mel => &MEL,
    }
}

static AKIEC: DiseaseInfo = DiseaseInfo {
    full_name: "Actinic Keratoses and Intraepithelial Carcinoma",
    description: "Actinic Keratoses are precancerous skin lesions caused by prolonged \
        exposure to ultraviolet (UV) radiation from the sun or tanning beds. They appear \
        as rough, scaly patches on sun-exposed areas like the face, neck, and hands. The \
        damage from UV radiation leads to mutations in the DNA of skin cells, promoting \
        abnormal cell growth. If left untreated, they can develop into squamous cell \
        carcinoma (SCC), a type of skin cancer. Intraepithelial carcinoma refers to \
        early-stage skin cancer confined to the upper layers of the skin, often resulting \
        from chronic sun damage.",
    prevention: &[
        "Avoid prolonged sun exposure, especially during peak hours (10 AM to 4 PM).",
        "Apply broad-spectrum sunscreen with SPF 30 or higher regularly.",
        "Wear protective clothing, including wide-brim hats and long-sleeved shirts.",
        "Avoid tanning beds and artificial UV sources.",
        "Regularly check your skin for changes and consult a dermatologist for suspicious lesions.",
    ],
    medicine: &[
        "Topical 5-fluorouracil (5-FU) for early-stage lesions.",
        "Imiquimod cream to boost the immune response.",
        "Cryotherapy (freezing) for small lesions.",
        "Surgical excision for advanced cases.",
    ],
    diet: &[
        "Consume antioxidant-rich foods such as berries, green tea, and dark leafy vegetables.",
        "Include foods high in omega-3 fatty acids, like salmon, flaxseeds, and walnuts.",
        "Vitamin C and E-rich foods (citrus fruits, nuts, and seeds) to support skin health.",
        "Drink plenty of water to keep the skin hydrated.",
    ],
};

static BCC: DiseaseInfo = DiseaseInfo {
    full_name: "Basal Cell Carcinoma",
    description: "Basal Cell Carcinoma is the most common form of skin cancer. It \
        typically develops in areas exposed to sunlight, such as the face, ears, and neck. \
        BCC arises from the basal cells in the epidermis and is primarily caused by \
        long-term sun exposure, frequent sunburns, and exposure to harmful UV rays. \
        Genetic factors can also increase susceptibility. Although it rarely spreads to \
        other parts of the body, untreated cases can cause significant tissue damage.",
    prevention: &[
        "Use a broad-spectrum sunscreen daily, even during cloudy weather.",
        "Reapply sunscreen every two hours when outdoors.",
        "Seek shade whenever possible.",
        "Perform regular self-skin checks for early detection.",
    ],
    medicine: &[
        "Topical imiquimod or 5-fluorouracil for superficial BCC.",
        "Mohs micrographic surgery for high-risk lesions.",
        "Radiation therapy for inoperable cases.",
        "Vismodegib or sonidegib for advanced cases.",
    ],
    diet: &[
        "Include cruciferous vegetables (broccoli, cauliflower) for cancer-fighting properties.",
        "Eat foods rich in polyphenols (green tea, dark chocolate).",
        "Increase intake of colorful fruits and vegetables for carotenoids.",
        "Avoid processed foods and limit sugar consumption.",
    ],
};

static BKL: DiseaseInfo = DiseaseInfo {
    full_name: "Benign Keratosis-like Lesions",
    description: "Benign Keratosis-like Lesions are non-cancerous growths that resemble \
        keratoses but do not pose a threat. These lesions are typically pigmented and may \
        be mistaken for malignant conditions. Factors such as aging, prolonged sun \
        exposure, and a buildup of keratin in the skin contribute to their development. \
        They are generally harmless but can be removed for cosmetic reasons.",
    prevention: &[
        "Maintain good skin hygiene.",
        "Use moisturizers to keep skin hydrated and reduce rough patches.",
        "Protect your skin from sun exposure by using sunscreen.",
    ],
    medicine: &[
        "Topical retinoids for improving skin texture.",
        "Cryotherapy for removal if necessary.",
        "Laser treatment for cosmetic concerns.",
    ],
    diet: &[
        "Maintain a balanced diet with plenty of fruits and vegetables.",
        "Include healthy fats like avocados and nuts for skin nourishment.",
        "Stay hydrated to promote healthy skin.",
    ],
};

static DF: DiseaseInfo = DiseaseInfo {
    full_name: "Dermatofibroma",
    description: "Dermatofibromas are benign skin growths that appear as firm, raised \
        nodules, often brown or reddish. They commonly occur on the legs and are believed \
        to develop in response to minor skin injuries like insect bites, shaving cuts, or \
        trauma. The body's immune response to these injuries triggers the formation of \
        fibrous tissue, leading to the development of dermatofibromas. These lesions are \
        harmless and typically do not require treatment unless they become bothersome.",
    prevention: &[
        "Avoid trauma or injury to the skin, as these lesions often form after minor injuries.",
        "Maintain proper skin care and hygiene.",
    ],
    medicine: &[
        "No specific treatment needed unless bothersome.",
        "Surgical excision if painful or for cosmetic reasons.",
        "Steroid injections for inflammation reduction.",
    ],
    diet: &[
        "Focus on anti-inflammatory foods like turmeric, ginger, and fatty fish.",
        "Include Vitamin C-rich foods to aid skin repair and collagen production.",
        "Consume plenty of leafy greens for overall skin health.",
    ],
};

static NV: DiseaseInfo = DiseaseInfo {
    full_name: "Melanocytic Nevi",
    description: "Melanocytic Nevi, commonly known as moles, are benign skin growths \
        formed by clusters of melanocytes (pigment-producing cells). They can vary in \
        size, shape, and color. The development of moles is influenced by genetic factors \
        and sun exposure, especially during childhood. While most moles are harmless, \
        excessive UV exposure can trigger mutations in melanocytes, increasing the risk \
        of transformation into melanoma.",
    prevention: &[
        "Limit sun exposure and use protective clothing.",
        "Apply sunscreen with a high SPF rating.",
        "Avoid picking at or irritating moles.",
    ],
    medicine: &[
        "No treatment required for benign moles.",
        "Laser removal for cosmetic purposes.",
        "Surgical excision if suspicious changes are observed.",
    ],
    diet: &[
        "Eat foods high in antioxidants like blueberries, spinach, and dark chocolate.",
        "Include foods rich in beta-carotene (carrots, sweet potatoes) to protect skin cells.",
        "Maintain proper hydration levels.",
    ],
};

static VASC: DiseaseInfo = DiseaseInfo {
    full_name: "Vascular Skin Lesions",
    description: "Vascular skin lesions are abnormalities in blood vessels near the \
        surface of the skin. They can appear as red, purple, or bluish marks and are \
        often congenital or develop later in life. Factors contributing to their \
        development include genetic predisposition, hormonal changes, and aging. These \
        lesions are typically benign but can occasionally require treatment for cosmetic \
        reasons or if they cause complications such as bleeding.",
    prevention: &[
        "Maintain a healthy weight to reduce pressure on blood vessels.",
        "Exercise regularly to improve blood flow.",
        "Avoid prolonged standing or sitting.",
        "Wear compression garments if necessary.",
    ],
    medicine: &[
        "Laser therapy for visible blood vessels.",
        "Sclerotherapy for reducing vascular lesions.",
        "Topical beta-blockers for small lesions.",
    ],
    diet: &[
        "Consume foods rich in flavonoids (citrus fruits, onions, dark chocolate) to strengthen blood vessels.",
        "Include foods high in Vitamin K (leafy greens) for better blood clotting.",
        "Reduce salt intake to minimize fluid retention.",
    ],
};

static MEL: DiseaseInfo = DiseaseInfo {
    full_name: "Melanoma",
    description: "Melanoma is the most aggressive and dangerous form of skin cancer. It \
        develops from melanocytes and can spread to other parts of the body if not \
        detected early. Melanoma is primarily caused by intense, intermittent sun \
        exposure, particularly sunburns during childhood. Genetic mutations in \
        melanocytes lead to uncontrolled cell growth and tumor formation. Additional \
        risk factors include a family history of melanoma, having a fair complexion, and \
        the presence of numerous atypical moles. Early detection and treatment are \
        crucial for a positive outcome.",
    prevention: &[
        "Avoid sun exposure, particularly during peak hours.",
        "Use a broad-spectrum sunscreen with SPF 50 or higher.",
        "Wear UV-protective clothing and sunglasses.",
        "Avoid tanning beds and artificial UV lights.",
        "Perform regular self-examinations and seek professional skin checks.",
    ],
    medicine: &[
        "Surgical removal for early-stage melanoma.",
        "Immunotherapy (e.g., pembrolizumab, nivolumab) for advanced cases.",
        "Targeted therapy (e.g., BRAF/MEK inhibitors) for genetic mutations.",
        "Chemotherapy for metastatic melanoma.",
    ],
    diet: &[
        "Eat antioxidant-rich foods to fight free radicals (berries, green tea).",
        "Include foods with lycopene (tomatoes, watermelon) for skin protection.",
        "Omega-3 fatty acids (fish, flaxseeds) to reduce inflammation.",
        "Limit processed foods and sugary snacks.",
    ],
};
