//! Uzbek Cyrillic <-> Latin transliteration.
//!
//! The Latin side follows the 1995 Uzbek Latin alphabet and writes the
//! modifier letter as a plain ASCII apostrophe (`o'`, `g'`). Any of the
//! apostrophe look-alikes people type is accepted on input. Characters outside
//! the table (digits, punctuation, other scripts) pass through untouched.

use super::Script;

pub const APOSTROPHES: [char; 6] = ['\'', '`', '‘', '’', 'ʻ', 'ʼ'];

const CYRILLIC_VOWELS: [char; 11] = ['а', 'е', 'ё', 'и', 'о', 'у', 'э', 'ю', 'я', 'ў', 'ы'];

/// Rewrite `text` into the `target` script.
pub fn transliterate(text: &str, target: Script) -> String {
    match target {
        Script::Latin => to_latin(text),
        Script::Cyrillic => to_cyrillic(text),
    }
}

fn is_apostrophe(c: char) -> bool {
    APOSTROPHES.contains(&c)
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn to_latin(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        let Some(latin) = cyrillic_letter_to_latin(lower(c), prev.map(lower)) else {
            out.push(c);
            continue;
        };

        if !c.is_uppercase() {
            out.push_str(latin);
            continue;
        }

        // A capital that expands to several Latin letters is fully upper-cased
        // only inside an upper-case run ("ШАҲАР" -> "SHAHAR", "Шаҳар" -> "Shahar").
        let in_caps_run = next.is_some_and(char::is_uppercase)
            || (prev.is_some_and(char::is_uppercase) && !next.is_some_and(char::is_lowercase));

        if in_caps_run {
            out.push_str(&latin.to_uppercase());
        } else {
            let mut letters = latin.chars();
            if let Some(first) = letters.next() {
                out.extend(first.to_uppercase());
                out.extend(letters);
            }
        }
    }

    out
}

fn cyrillic_letter_to_latin(c: char, prev: Option<char>) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => match prev {
            Some(p) if p.is_alphabetic() && !CYRILLIC_VOWELS.contains(&p) && p != 'ъ' && p != 'ь' => {
                "e"
            }
            _ => "ye",
        },
        'ё' => "yo",
        'ж' => "j",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "x",
        'ц' => "ts",
        'ч' => "ch",
        'ш' | 'щ' => "sh",
        'ъ' => "'",
        'ь' => "",
        'ы' => "i",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'ў' => "o'",
        'қ' => "q",
        'ғ' => "g'",
        // keeps "сҳ" apart from "ш" on the way back
        'ҳ' if prev == Some('с') => "'h",
        'ҳ' => "h",
        _ => return None,
    };
    Some(latin)
}

fn to_cyrillic(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let at = |offset: usize| chars.get(i + offset).copied().map(lower);

        if is_apostrophe(c) {
            let between_letters = prev.is_some_and(char::is_alphabetic)
                && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            out.push(if between_letters { 'ъ' } else { c });
            i += 1;
            continue;
        }

        let upper = c.is_uppercase();
        let (cyrillic, consumed, upper) = match (lower(c), at(1), at(2)) {
            ('o', Some(n), _) if is_apostrophe(n) => ('ў', 2, upper),
            ('g', Some(n), _) if is_apostrophe(n) => ('ғ', 2, upper),
            ('s', Some(n), Some('h')) if is_apostrophe(n) => {
                push_cased(&mut out, 'с', upper);
                ('ҳ', 3, chars[i + 2].is_uppercase())
            }
            ('s', Some('h'), _) => ('ш', 2, upper),
            ('c', Some('h'), _) => ('ч', 2, upper),
            // "yo'" is й + ў, not ё
            ('y', Some('o'), Some(n)) if is_apostrophe(n) => ('й', 1, upper),
            ('y', Some('o'), _) => ('ё', 2, upper),
            ('y', Some('u'), _) => ('ю', 2, upper),
            ('y', Some('a'), _) => ('я', 2, upper),
            ('y', Some('e'), _) => ('е', 2, upper),
            ('e', _, _) if !prev.is_some_and(char::is_alphabetic) => ('э', 1, upper),
            (l, _, _) => match latin_letter_to_cyrillic(l) {
                Some(cyr) => (cyr, 1, upper),
                None => {
                    out.push(c);
                    i += 1;
                    continue;
                }
            },
        };

        push_cased(&mut out, cyrillic, upper);
        i += consumed;
    }

    out
}

fn push_cased(out: &mut String, c: char, upper: bool) {
    if upper {
        out.extend(c.to_uppercase());
    } else {
        out.push(c);
    }
}

fn latin_letter_to_cyrillic(c: char) -> Option<char> {
    let cyrillic = match c {
        'a' => 'а',
        'b' => 'б',
        'c' => 'ц',
        'd' => 'д',
        'e' => 'е',
        'f' => 'ф',
        'g' => 'г',
        'h' => 'ҳ',
        'i' => 'и',
        'j' => 'ж',
        'k' => 'к',
        'l' => 'л',
        'm' => 'м',
        'n' => 'н',
        'o' => 'о',
        'p' => 'п',
        'q' => 'қ',
        'r' => 'р',
        's' => 'с',
        't' => 'т',
        'u' => 'у',
        'v' | 'w' => 'в',
        'x' => 'х',
        'y' => 'й',
        'z' => 'з',
        _ => return None,
    };
    Some(cyrillic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_to_latin() {
        assert_eq!(transliterate("китоб", Script::Latin), "kitob");
        assert_eq!(transliterate("машина", Script::Latin), "mashina");
        assert_eq!(transliterate("ўзбек", Script::Latin), "o'zbek");
        assert_eq!(transliterate("ғалаба", Script::Latin), "g'alaba");
        assert_eq!(transliterate("ҳаёт", Script::Latin), "hayot");
        assert_eq!(transliterate("маъно", Script::Latin), "ma'no");
    }

    #[test]
    fn test_ye_rule() {
        assert_eq!(transliterate("ер", Script::Latin), "yer");
        assert_eq!(transliterate("поезд", Script::Latin), "poyezd");
        assert_eq!(transliterate("мева", Script::Latin), "meva");
    }

    #[test]
    fn test_latin_to_cyrillic() {
        assert_eq!(transliterate("kitob", Script::Cyrillic), "китоб");
        assert_eq!(transliterate("o'zbek", Script::Cyrillic), "ўзбек");
        assert_eq!(transliterate("oʻzbek", Script::Cyrillic), "ўзбек");
        assert_eq!(transliterate("g‘alaba", Script::Cyrillic), "ғалаба");
        assert_eq!(transliterate("choy", Script::Cyrillic), "чой");
        assert_eq!(transliterate("eshik", Script::Cyrillic), "эшик");
        assert_eq!(transliterate("ma'no", Script::Cyrillic), "маъно");
        assert_eq!(transliterate("Is'hoq", Script::Cyrillic), "Исҳоқ");
        assert_eq!(transliterate("yo'l", Script::Cyrillic), "йўл");
        assert_eq!(transliterate("Yo'q", Script::Cyrillic), "Йўқ");
        assert_eq!(transliterate("yoz", Script::Cyrillic), "ёз");
    }

    #[test]
    fn test_casing() {
        assert_eq!(transliterate("Тошкент", Script::Latin), "Toshkent");
        assert_eq!(transliterate("ШАҲАР", Script::Latin), "SHAHAR");
        assert_eq!(transliterate("Шаҳар", Script::Latin), "Shahar");
        assert_eq!(transliterate("Ўзбекистон", Script::Latin), "O'zbekiston");
        assert_eq!(transliterate("O'zbekiston", Script::Cyrillic), "Ўзбекистон");
        assert_eq!(transliterate("SHAHAR", Script::Cyrillic), "ШАҲАР");
        assert_eq!(transliterate("Is'hoq", Script::Latin), "Is'hoq");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(transliterate("", Script::Latin), "");
        assert_eq!(transliterate("123, !?", Script::Cyrillic), "123, !?");
        assert_eq!(transliterate("✅ Китоб\n❌ Тест", Script::Latin), "✅ Kitob\n❌ Test");
        assert_eq!(transliterate("'salom'", Script::Cyrillic), "'салом'");
    }

    #[test]
    fn test_round_trip() {
        let words = [
            "китоб", "бола", "қалам", "ҳаёт", "дарахт", "ўзбек", "ғалаба", "эшик", "мактаб",
            "маъно", "ер", "мева", "Тошкент", "Исҳоқ", "дунё", "ўқитувчи", "йўл", "йўқ",
        ];
        for word in words {
            let latin = transliterate(word, Script::Latin);
            assert_eq!(transliterate(&latin, Script::Cyrillic), word, "via {latin}");
        }
    }
}
