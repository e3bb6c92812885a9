/// Uppercases, folds Spanish accents and collapses whitespace runs.
///
/// Punctuation is kept so multi-word phrases such as `ABD/PEL` or
/// `ABDOMEN-PELVIS` survive normalization and can be matched verbatim.
pub fn normalize_procedure_name(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_space = true;
    for character in value.chars() {
        if character.is_whitespace() {
            if !previous_space {
                output.push(' ');
                previous_space = true;
            }
            continue;
        }
        output.push(fold_accent(character).to_ascii_uppercase());
        previous_space = false;
    }

    output.trim_end().to_string()
}

/// Splits normalized text on anything that is not an ASCII letter or digit.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(|character: char| !character.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
}

pub fn normalize_room(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

fn fold_accent(character: char) -> char {
    match character {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'A',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' | 'Ñ' => 'N',
        other => other,
    }
}
