//! Language codes and the static resolver table.
//!
//! Media file names announce their audio tracks with either ISO 639-1
//! (two letters, `de`) or ISO 639-3 (three letters, `deu`) codes, and the
//! choice changes from talk to talk within one listing. Everything stored
//! in an index is normalised to the three-letter form.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::error::{Error, Result};

/// Version of the built-in language table.
///
/// The table covers every ISO 639-1 language, the ISO 639-3 individual
/// languages behind them, and regional and sign languages that appear on
/// conference audio tracks (`gsw`, `bar`, `swg`, `gsg`, ...). Other ISO 639-3
/// codes resolve as unknown until they are added here.
///
/// Bump this whenever codes or aliases are added, so diagnostics can state
/// which table resolved a listing.
pub const TABLE_VERSION: &str = "2024.2";

/// Canonical ISO 639-3 codes known to the resolver, with English names.
static LANGUAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "aar" => "Afar",
    "abk" => "Abkhazian",
    "afr" => "Afrikaans",
    "aka" => "Akan",
    "amh" => "Amharic",
    "ara" => "Arabic",
    "arg" => "Aragonese",
    "ase" => "American Sign Language",
    "asm" => "Assamese",
    "ast" => "Asturian",
    "ava" => "Avaric",
    "ave" => "Avestan",
    "aym" => "Aymara",
    "aze" => "Azerbaijani",
    "bak" => "Bashkir",
    "bam" => "Bambara",
    "bar" => "Bavarian",
    "bel" => "Belarusian",
    "ben" => "Bengali",
    "bfi" => "British Sign Language",
    "bis" => "Bislama",
    "bod" => "Tibetan",
    "bos" => "Bosnian",
    "bre" => "Breton",
    "bul" => "Bulgarian",
    "cat" => "Catalan",
    "ces" => "Czech",
    "cha" => "Chamorro",
    "che" => "Chechen",
    "chu" => "Church Slavic",
    "chv" => "Chuvash",
    "ckb" => "Central Kurdish",
    "cmn" => "Mandarin Chinese",
    "cor" => "Cornish",
    "cos" => "Corsican",
    "cre" => "Cree",
    "csb" => "Kashubian",
    "cym" => "Welsh",
    "dan" => "Danish",
    "deu" => "German",
    "div" => "Dhivehi",
    "dsb" => "Lower Sorbian",
    "dzo" => "Dzongkha",
    "ell" => "Modern Greek",
    "eng" => "English",
    "epo" => "Esperanto",
    "est" => "Estonian",
    "eus" => "Basque",
    "ewe" => "Ewe",
    "fao" => "Faroese",
    "fas" => "Persian",
    "fij" => "Fijian",
    "fil" => "Filipino",
    "fin" => "Finnish",
    "fra" => "French",
    "frr" => "Northern Frisian",
    "fry" => "Western Frisian",
    "fsl" => "French Sign Language",
    "ful" => "Fulah",
    "fur" => "Friulian",
    "gla" => "Scottish Gaelic",
    "gle" => "Irish",
    "glg" => "Galician",
    "glv" => "Manx",
    "grn" => "Guarani",
    "gsg" => "German Sign Language",
    "gsw" => "Swiss German",
    "guj" => "Gujarati",
    "hat" => "Haitian",
    "hau" => "Hausa",
    "heb" => "Hebrew",
    "her" => "Herero",
    "hin" => "Hindi",
    "hmo" => "Hiri Motu",
    "hrv" => "Croatian",
    "hrx" => "Hunsrik",
    "hsb" => "Upper Sorbian",
    "hun" => "Hungarian",
    "hye" => "Armenian",
    "ibo" => "Igbo",
    "ido" => "Ido",
    "iii" => "Sichuan Yi",
    "iku" => "Inuktitut",
    "ile" => "Interlingue",
    "ina" => "Interlingua",
    "ind" => "Indonesian",
    "ipk" => "Inupiaq",
    "isl" => "Icelandic",
    "ita" => "Italian",
    "jav" => "Javanese",
    "jpn" => "Japanese",
    "kal" => "Kalaallisut",
    "kan" => "Kannada",
    "kas" => "Kashmiri",
    "kat" => "Georgian",
    "kau" => "Kanuri",
    "kaz" => "Kazakh",
    "khm" => "Khmer",
    "kik" => "Kikuyu",
    "kin" => "Kinyarwanda",
    "kir" => "Kirghiz",
    "kom" => "Komi",
    "kon" => "Kongo",
    "kor" => "Korean",
    "ksh" => "Kölsch",
    "kua" => "Kuanyama",
    "kur" => "Kurdish",
    "lao" => "Lao",
    "lat" => "Latin",
    "lav" => "Latvian",
    "lij" => "Ligurian",
    "lim" => "Limburgan",
    "lin" => "Lingala",
    "lit" => "Lithuanian",
    "lld" => "Ladin",
    "lmo" => "Lombard",
    "ltg" => "Latgalian",
    "ltz" => "Luxembourgish",
    "lub" => "Luba-Katanga",
    "lug" => "Ganda",
    "mah" => "Marshallese",
    "mal" => "Malayalam",
    "mar" => "Marathi",
    "mkd" => "Macedonian",
    "mlg" => "Malagasy",
    "mlt" => "Maltese",
    "mon" => "Mongolian",
    "mri" => "Maori",
    "msa" => "Malay",
    "mul" => "Multiple languages",
    "mya" => "Burmese",
    "nap" => "Neapolitan",
    "nau" => "Nauru",
    "nav" => "Navajo",
    "nbl" => "South Ndebele",
    "nde" => "North Ndebele",
    "ndo" => "Ndonga",
    "nds" => "Low German",
    "nep" => "Nepali",
    "nld" => "Dutch",
    "nno" => "Norwegian Nynorsk",
    "nob" => "Norwegian Bokmal",
    "nor" => "Norwegian",
    "nya" => "Nyanja",
    "oci" => "Occitan",
    "oji" => "Ojibwa",
    "ori" => "Oriya",
    "orm" => "Oromo",
    "oss" => "Ossetian",
    "pan" => "Panjabi",
    "pfl" => "Palatine German",
    "pli" => "Pali",
    "pol" => "Polish",
    "por" => "Portuguese",
    "pus" => "Pushto",
    "que" => "Quechua",
    "roh" => "Romansh",
    "rom" => "Romany",
    "ron" => "Romanian",
    "rue" => "Rusyn",
    "run" => "Rundi",
    "rus" => "Russian",
    "sag" => "Sango",
    "san" => "Sanskrit",
    "scn" => "Sicilian",
    "sco" => "Scots",
    "sgs" => "Samogitian",
    "sin" => "Sinhala",
    "slk" => "Slovak",
    "slv" => "Slovenian",
    "sme" => "Northern Sami",
    "smo" => "Samoan",
    "sna" => "Shona",
    "snd" => "Sindhi",
    "som" => "Somali",
    "sot" => "Southern Sotho",
    "spa" => "Spanish",
    "sqi" => "Albanian",
    "srd" => "Sardinian",
    "srp" => "Serbian",
    "ssw" => "Swati",
    "stq" => "Saterfriesisch",
    "sun" => "Sundanese",
    "swa" => "Swahili",
    "swe" => "Swedish",
    "swg" => "Swabian",
    "sxu" => "Upper Saxon",
    "szl" => "Silesian",
    "tah" => "Tahitian",
    "tam" => "Tamil",
    "tat" => "Tatar",
    "tel" => "Telugu",
    "tgk" => "Tajik",
    "tgl" => "Tagalog",
    "tha" => "Thai",
    "tir" => "Tigrinya",
    "ton" => "Tonga",
    "tsn" => "Tswana",
    "tso" => "Tsonga",
    "tuk" => "Turkmen",
    "tur" => "Turkish",
    "twi" => "Twi",
    "uig" => "Uighur",
    "ukr" => "Ukrainian",
    "urd" => "Urdu",
    "uzb" => "Uzbek",
    "vec" => "Venetian",
    "ven" => "Venda",
    "vie" => "Vietnamese",
    "vmf" => "Mainfränkisch",
    "vol" => "Volapuk",
    "wae" => "Walser",
    "wln" => "Walloon",
    "wol" => "Wolof",
    "xho" => "Xhosa",
    "yid" => "Yiddish",
    "yor" => "Yoruba",
    "yue" => "Yue Chinese",
    "zha" => "Zhuang",
    "zho" => "Chinese",
    "zul" => "Zulu",
    "zxx" => "No linguistic content",
};

/// ISO 639-1 codes and their ISO 639-3 equivalents.
static ALPHA2: phf::Map<&'static str, &'static str> = phf_map! {
    "aa" => "aar", "ab" => "abk", "ae" => "ave", "af" => "afr", "ak" => "aka",
    "am" => "amh", "an" => "arg", "ar" => "ara", "as" => "asm", "av" => "ava",
    "ay" => "aym", "az" => "aze", "ba" => "bak", "be" => "bel", "bg" => "bul",
    "bi" => "bis", "bm" => "bam", "bn" => "ben", "bo" => "bod", "br" => "bre",
    "bs" => "bos", "ca" => "cat", "ce" => "che", "ch" => "cha", "co" => "cos",
    "cr" => "cre", "cs" => "ces", "cu" => "chu", "cv" => "chv", "cy" => "cym",
    "da" => "dan", "de" => "deu", "dv" => "div", "dz" => "dzo", "ee" => "ewe",
    "el" => "ell", "en" => "eng", "eo" => "epo", "es" => "spa", "et" => "est",
    "eu" => "eus", "fa" => "fas", "ff" => "ful", "fi" => "fin", "fj" => "fij",
    "fo" => "fao", "fr" => "fra", "fy" => "fry", "ga" => "gle", "gd" => "gla",
    "gl" => "glg", "gn" => "grn", "gu" => "guj", "gv" => "glv", "ha" => "hau",
    "he" => "heb", "hi" => "hin", "ho" => "hmo", "hr" => "hrv", "ht" => "hat",
    "hu" => "hun", "hy" => "hye", "hz" => "her", "ia" => "ina", "id" => "ind",
    "ie" => "ile", "ig" => "ibo", "ii" => "iii", "ik" => "ipk", "io" => "ido",
    "is" => "isl", "it" => "ita", "iu" => "iku", "ja" => "jpn", "jv" => "jav",
    "ka" => "kat", "kg" => "kon", "ki" => "kik", "kj" => "kua", "kk" => "kaz",
    "kl" => "kal", "km" => "khm", "kn" => "kan", "ko" => "kor", "kr" => "kau",
    "ks" => "kas", "ku" => "kur", "kv" => "kom", "kw" => "cor", "ky" => "kir",
    "la" => "lat", "lb" => "ltz", "lg" => "lug", "li" => "lim", "ln" => "lin",
    "lo" => "lao", "lt" => "lit", "lu" => "lub", "lv" => "lav", "mg" => "mlg",
    "mh" => "mah", "mi" => "mri", "mk" => "mkd", "ml" => "mal", "mn" => "mon",
    "mr" => "mar", "ms" => "msa", "mt" => "mlt", "my" => "mya", "na" => "nau",
    "nb" => "nob", "nd" => "nde", "ne" => "nep", "ng" => "ndo", "nl" => "nld",
    "nn" => "nno", "no" => "nor", "nr" => "nbl", "nv" => "nav", "ny" => "nya",
    "oc" => "oci", "oj" => "oji", "om" => "orm", "or" => "ori", "os" => "oss",
    "pa" => "pan", "pi" => "pli", "pl" => "pol", "ps" => "pus", "pt" => "por",
    "qu" => "que", "rm" => "roh", "rn" => "run", "ro" => "ron", "ru" => "rus",
    "rw" => "kin", "sa" => "san", "sc" => "srd", "sd" => "snd", "se" => "sme",
    "sg" => "sag", "si" => "sin", "sk" => "slk", "sl" => "slv", "sm" => "smo",
    "sn" => "sna", "so" => "som", "sq" => "sqi", "sr" => "srp", "ss" => "ssw",
    "st" => "sot", "su" => "sun", "sv" => "swe", "sw" => "swa", "ta" => "tam",
    "te" => "tel", "tg" => "tgk", "th" => "tha", "ti" => "tir", "tk" => "tuk",
    "tl" => "tgl", "tn" => "tsn", "to" => "ton", "tr" => "tur", "ts" => "tso",
    "tt" => "tat", "tw" => "twi", "ty" => "tah", "ug" => "uig", "uk" => "ukr",
    "ur" => "urd", "uz" => "uzb", "ve" => "ven", "vi" => "vie", "vo" => "vol",
    "wa" => "wln", "wo" => "wol", "xh" => "xho", "yi" => "yid", "yo" => "yor",
    "za" => "zha", "zh" => "zho", "zu" => "zul",
};

/// Historical and bibliographic three-letter codes seen in listings.
///
/// `chi` is what the encoders wrote for Chinese tracks for years.
static ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "chi" => "zho",
    "alb" => "sqi",
    "arm" => "hye",
    "baq" => "eus",
    "bur" => "mya",
    "cze" => "ces",
    "dut" => "nld",
    "fre" => "fra",
    "geo" => "kat",
    "ger" => "deu",
    "gre" => "ell",
    "ice" => "isl",
    "mac" => "mkd",
    "mao" => "mri",
    "may" => "msa",
    "per" => "fas",
    "rum" => "ron",
    "slo" => "slk",
    "tib" => "bod",
    "wel" => "cym",
};

/// Which code standard a token is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LanguageStandard {
    /// ISO 639-1 (`de`, `en`).
    Alpha2,
    /// ISO 639-3 (`deu`, `eng`).
    Alpha3,
}

impl LanguageStandard {
    /// The standard implied by a token's length, if any.
    pub fn for_token(token: &str) -> Option<Self> {
        match token.len() {
            2 => Some(LanguageStandard::Alpha2),
            3 => Some(LanguageStandard::Alpha3),
            _ => None,
        }
    }

    /// Number of letters in a code of this standard.
    pub fn code_len(self) -> usize {
        match self {
            LanguageStandard::Alpha2 => 2,
            LanguageStandard::Alpha3 => 3,
        }
    }
}

impl fmt::Display for LanguageStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageStandard::Alpha2 => f.write_str("ISO 639-1"),
            LanguageStandard::Alpha3 => f.write_str("ISO 639-3"),
        }
    }
}

/// A canonical three-letter language code.
///
/// Values only come out of the resolver table, so every `LanguageCode`
/// is a known ISO 639-3 code. Ordering is by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// The three-letter code.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        LANGUAGES.get(self.0).copied().unwrap_or(self.0)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        to_canonical(s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0.to_string()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LanguageCode {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Codes are re-resolved on the way in, so aliases and two-letter forms
/// deserialize to their canonical code.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LanguageCode {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        to_canonical(&code).map_err(serde::de::Error::custom)
    }
}

fn canonical(code: &str) -> Option<LanguageCode> {
    LANGUAGES.get_entry(code).map(|(key, _)| LanguageCode(key))
}

fn unknown(code: &str) -> Error {
    Error::UnknownLanguageCode {
        code: code.to_string(),
    }
}

/// Resolve a token under an explicitly chosen standard.
///
/// Fails with [`Error::UnknownLanguageCode`] if the token's length does not
/// match the standard or the table has no entry for it.
pub fn resolve_as(token: &str, standard: LanguageStandard) -> Result<LanguageCode> {
    if token.len() != standard.code_len() {
        return Err(unknown(token));
    }
    let lower = token.to_ascii_lowercase();
    let resolved = match standard {
        LanguageStandard::Alpha2 => ALPHA2.get(lower.as_str()).and_then(|c| canonical(c)),
        LanguageStandard::Alpha3 => {
            let target = ALIASES.get(lower.as_str()).copied().unwrap_or(lower.as_str());
            canonical(target)
        }
    };
    resolved.ok_or_else(|| unknown(token))
}

/// Resolve a two- or three-letter token to its canonical ISO 639-3 code.
///
/// The token's length decides which standard is assumed.
///
/// ```
/// use frabdl_parser::to_canonical;
///
/// assert_eq!(to_canonical("de").unwrap().as_str(), "deu");
/// assert_eq!(to_canonical("deu").unwrap().as_str(), "deu");
/// assert_eq!(to_canonical("chi").unwrap().as_str(), "zho");
/// assert!(to_canonical("special").is_err());
/// ```
pub fn to_canonical(code: &str) -> Result<LanguageCode> {
    match LanguageStandard::for_token(code) {
        Some(standard) => resolve_as(code, standard),
        None => Err(unknown(code)),
    }
}

/// Join codes into a language-combination key (sorted, `-` separated).
///
/// ```
/// use frabdl_parser::{language_key, to_canonical};
///
/// let codes = [to_canonical("eng").unwrap(), to_canonical("de").unwrap()];
/// assert_eq!(language_key(&codes), "deu-eng");
/// ```
pub fn language_key<'a>(codes: impl IntoIterator<Item = &'a LanguageCode>) -> String {
    let mut codes: Vec<&str> = codes.into_iter().map(|c| c.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();
    codes.join("-")
}
