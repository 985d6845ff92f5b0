//! Built-in sample content (a few hymns of the Rig Veda)
//!
//! English renderings are Ralph T.H. Griffith's 1896 translation.

use crate::error::ContentError;
use crate::models::{Scripture, ScriptureDocument, Section, Subsection, TranslationPayload, Verse};

/// Build the demo scripture
pub fn rig_veda() -> Result<Scripture, ContentError> {
    let mut mandala_1 = Section::new(
        "mandala-1",
        "Mandala 1",
        vec![sukta_1_1(), sukta_1_164()],
    );
    mandala_1.description = Some("Hymns to Agni, Indra and the Visvedevas".to_string());

    let mut purusha = Subsection::new("sukta-10-90", "Sukta 90: Purusha", vec![]);
    purusha.description = Some("Not yet transcribed".to_string());

    let mandala_10 = Section::new("mandala-10", "Mandala 10", vec![sukta_10_129(), purusha]);

    Scripture::new(ScriptureDocument {
        id: "rigveda".to_string(),
        title: "Rig Veda".to_string(),
        subtitle: Some("Selected hymns".to_string()),
        description: Some("A small sample to try shloka without a content file".to_string()),
        sections: vec![mandala_1, mandala_10],
        section_level_name: Some("Mandala".to_string()),
        subsection_level_name: Some("Sukta".to_string()),
        verse_level_name: Some("Mantra".to_string()),
    })
}

fn sukta_1_1() -> Subsection {
    let mut sukta = Subsection::new(
        "sukta-1-1",
        "Sukta 1: Agni",
        vec![
            Verse::new(
                "1.1.1",
                &["agnim īḷe purohitaṃ yajñasya devam ṛtvijam", "hotāraṃ ratnadhātamam"],
            )
            .with_alternate_script(&["अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम् ।", "होतारं रत्नधातमम् ॥"])
            .with_translation(
                "en",
                "I Laud Agni, the chosen Priest, God, minister of sacrifice, \
                 The Hotar, lavishest of wealth.",
            )
            .with_verified("en"),
            Verse::new(
                "1.1.2",
                &["agniḥ pūrvebhir ṛṣibhir īḍyo nūtanair uta", "sa devāṃ eha vakṣati"],
            )
            .with_alternate_script(&["अग्निः पूर्वेभिरृषिभिरीड्यो नूतनैरुत ।", "स देवाँ एह वक्षति ॥"])
            .with_translation(
                "en",
                "Worthy is Agni to be praised by living as by ancient seers. \
                 He shall bring hitherward the Gods.",
            )
            .with_verified("en"),
            Verse::new(
                "1.1.3",
                &["agninā rayim aśnavat poṣam eva dive-dive", "yaśasaṃ vīravattamam"],
            )
            .with_alternate_script(&["अग्निना रयिमश्नवत्पोषमेव दिवेदिवे ।", "यशसं वीरवत्तमम् ॥"])
            .with_translation(
                "en",
                "Through Agni man obtaineth wealth, yea, plenty waxing day by day, \
                 Most rich in heroes, glorious.",
            )
            .with_verified("en"),
        ],
    );
    sukta.description = Some("The opening hymn, addressed to Agni".to_string());
    sukta
}

fn sukta_1_164() -> Subsection {
    Subsection::new(
        "sukta-1-164",
        "Sukta 164: Asya Vamasya",
        vec![
            Verse::new(
                "1.164.46",
                &[
                    "indram mitraṃ varuṇam agnim āhur atho divyaḥ sa suparṇo garutmān",
                    "ekaṃ sad viprā bahudhā vadanty agniṃ yamam mātariśvānam āhuḥ",
                ],
            )
            .with_alternate_script(&[
                "इन्द्रं मित्रं वरुणमग्निमाहुरथो दिव्यः स सुपर्णो गरुत्मान् ।",
                "एकं सद्विप्रा बहुधा वदन्त्यग्निं यमं मातरिश्वानमाहुः ॥",
            ])
            .with_payload(
                "en",
                TranslationPayload {
                    gloss: Some(
                        "ekam: one; sat: that which is, truth; viprāḥ: the wise; \
                         bahudhā: in many ways; vadanti: speak"
                            .to_string(),
                    ),
                    phrase_analysis: Some(
                        "They call him Indra, Mitra, Varuna, Agni, and he is heavenly \
                         nobly-winged Garutman. To what is One, sages give many a title: \
                         they call it Agni, Yama, Matarisvan."
                            .to_string(),
                    ),
                    purport: Some(
                        "The many gods are names the wise give to a single reality.".to_string(),
                    ),
                },
            ),
        ],
    )
}

fn sukta_10_129() -> Subsection {
    Subsection::new(
        "sukta-10-129",
        "Sukta 129: Nasadiya",
        vec![
            Verse::new(
                "10.129.1",
                &[
                    "nāsad āsīn no sad āsīt tadānīṃ nāsīd rajo no vyomā paro yat",
                    "kim āvarīvaḥ kuha kasya śarmann ambhaḥ kim āsīd gahanaṃ gabhīram",
                ],
            )
            .with_alternate_script(&[
                "नासदासीन्नो सदासीत्तदानीं नासीद्रजो नो व्योमा परो यत् ।",
                "किमावरीवः कुह कस्य शर्मन्नम्भः किमासीद्गहनं गभीरम् ॥",
            ])
            .with_translation(
                "en",
                "Then was not non-existent nor existent: there was no realm of air, \
                 no sky beyond it. What covered in, and where? and what gave shelter? \
                 Was water there, unfathomed depth of water?",
            ),
            Verse::new(
                "10.129.2",
                &[
                    "na mṛtyur āsīd amṛtaṃ na tarhi na rātryā ahna āsīt praketaḥ",
                    "ānīd avātaṃ svadhayā tad ekaṃ tasmād dhānyan na paraḥ kiṃ canāsa",
                ],
            )
            .with_alternate_script(&[
                "न मृत्युरासीदमृतं न तर्हि न रात्र्या अह्न आसीत्प्रकेतः ।",
                "आनीदवातं स्वधया तदेकं तस्माद्धान्यन्न परः किं चनास ॥",
            ]),
        ],
    )
}
