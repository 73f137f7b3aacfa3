//! Per-language anchor phrase tables.
//!
//! Kept as data rather than control flow so adding a tenth language is a
//! table edit. `{}` marks where the base text is interpolated; generic
//! phrases take no interpolation.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Anchor templates for one language.
pub(crate) struct PhraseSet {
    pub long_tail: &'static [&'static str],
    pub cta: &'static [&'static str],
    pub question: &'static [&'static str],
    pub generic: &'static [&'static str],
}

static TABLES: LazyLock<HashMap<&'static str, PhraseSet>> = LazyLock::new(|| {
    let mut tables = HashMap::new();

    tables.insert(
        "fr",
        PhraseSet {
            long_tail: &[
                "tout savoir sur {}",
                "notre guide complet sur {}",
                "les informations essentielles sur {}",
            ],
            cta: &["découvrez {}", "consultez {}", "explorez {}"],
            question: &[
                "comment fonctionne {} ?",
                "qu'est-ce que {} ?",
                "pourquoi choisir {} ?",
            ],
            generic: &["en savoir plus", "lire la suite", "cliquez ici"],
        },
    );

    tables.insert(
        "en",
        PhraseSet {
            long_tail: &[
                "everything you need to know about {}",
                "a complete guide to {}",
                "key facts about {}",
            ],
            cta: &["discover {}", "check out {}", "explore {}"],
            question: &["how does {} work?", "what is {}?", "why choose {}?"],
            generic: &["learn more", "read more", "click here"],
        },
    );

    tables.insert(
        "es",
        PhraseSet {
            long_tail: &[
                "todo lo que debes saber sobre {}",
                "guía completa de {}",
                "información esencial sobre {}",
            ],
            cta: &["descubre {}", "consulta {}", "explora {}"],
            question: &[
                "¿cómo funciona {}?",
                "¿qué es {}?",
                "¿por qué elegir {}?",
            ],
            generic: &["más información", "leer más", "haz clic aquí"],
        },
    );

    tables.insert(
        "de",
        PhraseSet {
            long_tail: &[
                "alles Wissenswerte über {}",
                "der komplette Leitfaden zu {}",
                "wichtige Fakten zu {}",
            ],
            cta: &[
                "entdecken Sie {}",
                "informieren Sie sich über {}",
                "erfahren Sie mehr über {}",
            ],
            question: &["wie funktioniert {}?", "was ist {}?", "warum {} wählen?"],
            generic: &["mehr erfahren", "weiterlesen", "hier klicken"],
        },
    );

    tables.insert(
        "pt",
        PhraseSet {
            long_tail: &[
                "tudo o que você precisa saber sobre {}",
                "guia completo de {}",
                "informações essenciais sobre {}",
            ],
            cta: &["descubra {}", "confira {}", "explore {}"],
            question: &[
                "como funciona {}?",
                "o que é {}?",
                "por que escolher {}?",
            ],
            generic: &["saiba mais", "leia mais", "clique aqui"],
        },
    );

    tables.insert(
        "ru",
        PhraseSet {
            long_tail: &[
                "всё, что нужно знать о {}",
                "полное руководство по {}",
                "основные сведения о {}",
            ],
            cta: &["узнайте больше о {}", "ознакомьтесь с {}", "изучите {}"],
            question: &[
                "как работает {}?",
                "что такое {}?",
                "почему стоит выбрать {}?",
            ],
            generic: &["узнать больше", "читать далее", "подробнее"],
        },
    );

    tables.insert(
        "zh",
        PhraseSet {
            long_tail: &["关于{}的完整指南", "{}的重要信息", "全面了解{}"],
            cta: &["了解{}", "查看{}", "探索{}"],
            question: &["什么是{}？", "{}如何运作？", "为什么选择{}？"],
            generic: &["了解更多", "阅读更多", "点击这里"],
        },
    );

    tables.insert(
        "ar",
        PhraseSet {
            long_tail: &[
                "كل ما تحتاج معرفته عن {}",
                "دليل شامل حول {}",
                "معلومات أساسية عن {}",
            ],
            cta: &["اكتشف {}", "اطلع على {}", "تعرف على {}"],
            question: &["ما هو {}?", "كيف يعمل {}?", "لماذا تختار {}?"],
            generic: &["اقرأ المزيد", "اعرف المزيد", "انقر هنا"],
        },
    );

    tables.insert(
        "hi",
        PhraseSet {
            long_tail: &[
                "{} के बारे में पूरी जानकारी",
                "{} की संपूर्ण गाइड",
                "{} से जुड़ी मुख्य बातें",
            ],
            cta: &["{} देखें", "{} के बारे में जानें", "{} एक्सप्लोर करें"],
            question: &[
                "{} क्या है?",
                "{} कैसे काम करता है?",
                "{} क्यों चुनें?",
            ],
            generic: &["और जानें", "आगे पढ़ें", "यहाँ क्लिक करें"],
        },
    );

    tables
});

/// Phrase table for a normalized language code, English for anything else.
pub(crate) fn phrases_for(language: &str) -> &'static PhraseSet {
    TABLES
        .get(language)
        .unwrap_or_else(|| TABLES.get("en").expect("english table"))
}
