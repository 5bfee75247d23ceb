use indoc::indoc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use slede8::addr::Addr;
use slede8::dis::slede8::disassemble_word;
use slede8::label::LabelTable;
use slede8::{Analysis, disassemble, is_filetype_error, load_image};

//===========================================================================//

fn disassemble_file(file: &[u8]) -> String {
    disassemble(&load_image(file).unwrap())
}

fn with_header(image: &[u8]) -> Vec<u8> {
    let mut file = b".SLEDE8".to_vec();
    file.extend_from_slice(image);
    file
}

//===========================================================================//

#[test]
fn set_and_stop() {
    assert_eq!(
        disassemble_file(b".SLEDE8\x01\x05\x00\x00"),
        indoc! {"

            ; Labels:

            ; Guessed data segments:

            ;SLEDE8 BEGIN
            SETT r0, 0x5
            STOPP
            ;SLEDE8 END
        "}
    );
}

#[test]
fn bad_header() {
    let error = load_image(&b"XSLEDE8\x01\x05\x00\x00"[..]).unwrap_err();
    assert!(is_filetype_error(&error));
    assert_eq!(error.to_string(), "Filetype error.");
}

#[test]
fn print_message() {
    let image = [
        0xa3, 0x00, // FINN DataBlock0
        0x04, 0x00, // LAST r0
        0x16, 0x00, // SKRIV r0
        0xe8, 0x00, // HOPP Branch0
        0x0c, 0x00, // NOPE
        b'H', b'e', b'i', b'!', // DataBlock0
        0x00, 0x00, // Branch0: STOPP
    ];
    assert_eq!(
        disassemble_file(&with_header(&image)),
        indoc! {"

            ; Labels:
            ; 0x00a - DataBlock0
            ; 0x00e - Branch0

            ; Guessed data segments:
            ; \t *0x00a to 0x00d data block of length 4.

            ;SLEDE8 BEGIN
            FINN DataBlock0
            LAST r0
            SKRIV r0
            HOPP Branch0
            NOPE

            DataBlock0:
            .DATA 0x48, 0x65, 0x69, 0x21

            Branch0:
            STOPP
            ;SLEDE8 END
        "}
    );
}

#[test]
fn subroutine_and_data_at_end() {
    let image = [
        0x41, 0x02, // SETT r4, 0x2
        0x8a, 0x00, // TUR Branch0
        0x00, 0x00, // STOPP
        0x00, 0x00, // STOPP
        0xe3, 0x00, // Branch0: FINN DataBlock0
        0x14, 0x04, // LAGR r4
        0x0b, 0x00, // RETUR
        0xff, 0x10, // DataBlock0
    ];
    assert_eq!(
        disassemble(&image),
        indoc! {"

            ; Labels:
            ; 0x00e - DataBlock0
            ; 0x008 - Branch0

            ; Guessed data segments:
            ; \t *0x00e to 0x00f data block of length 2.

            ;SLEDE8 BEGIN
            SETT r4, 0x2
            TUR Branch0
            STOPP
            STOPP

            Branch0:
            FINN DataBlock0
            LAGR r4
            RETUR

            DataBlock0:
            .DATA 0xff, 0x10
            ;SLEDE8 END
        "}
    );
}

#[test]
fn unknown_operations_are_annotated() {
    let image = [0x0d, 0x00, 0x75, 0x21, 0x16, 0x10, 0x00, 0x00];
    assert_eq!(
        disassemble(&image),
        indoc! {"

            ; Labels:

            ; Guessed data segments:

            ;SLEDE8 BEGIN
            ; Unknown operation 0xd 0x0
            ; Unknown operation 0x75 0x21
            ; Unknown operation 0x16 0x10
            STOPP
            ;SLEDE8 END
        "}
    );
}

#[test]
fn reference_one_past_the_end() {
    // The target is labeled, but no label line is emitted for it because
    // there is no byte there.
    let image = [0x48, 0x00, 0x00, 0x00];
    assert_eq!(
        disassemble(&image),
        indoc! {"

            ; Labels:
            ; 0x004 - Branch0

            ; Guessed data segments:

            ;SLEDE8 BEGIN
            HOPP Branch0
            STOPP
            ;SLEDE8 END
        "}
    );
}

#[test]
fn duplicate_references_advance_numbering() {
    let image = [
        0x88, 0x00, // HOPP Branch0
        0x89, 0x00, // BHOPP Branch0
        0xa3, 0x00, // FINN DataBlock0
        0xa3, 0x00, // FINN DataBlock0
        0x0c, 0x00, // Branch0: NOPE
        0x01, 0x02, // DataBlock0
        0x00, 0x00, // STOPP
        0x08, 0x00, // HOPP Branch2
    ];
    let analysis = Analysis::new(&image);
    let labels: Vec<_> = analysis.labels().iter().collect();
    assert_eq!(
        labels,
        vec![
            (Addr::MIN, "Branch2"),
            (Addr::wrap_u16(0x8), "Branch0"),
            (Addr::wrap_u16(0xa), "DataBlock0"),
        ]
    );
    assert_eq!(
        disassemble(&image),
        indoc! {"

            ; Labels:
            ; 0x00a - DataBlock0
            ; 0x00a - DataBlock0
            ; 0x008 - Branch0
            ; 0x008 - Branch0
            ; 0x000 - Branch2

            ; Guessed data segments:
            ; \t *0x00a to 0x00f data block of length 6.
            ; \t *0x00a to 0x00f data block of length 6.

            ;SLEDE8 BEGIN

            Branch2:
            HOPP Branch0
            BHOPP Branch0
            FINN DataBlock0
            FINN DataBlock0

            Branch0:
            NOPE

            DataBlock0:
            .DATA 0x1, 0x2, 0x0, 0x0, 0x8, 0x0
            ;SLEDE8 END
        "}
    );
}

//===========================================================================//

const MNEMONICS: &[&str] = &[
    "STOPP", "SETT", "FINN", "LAGR", "LAST", "OG", "ELLER", "XELLER",
    "VSKIFT", "HSKIFT", "PLUSS", "MINUS", "SKRIV", "LES", "LIK", "ULIK", "ME",
    "MEL", "SE", "SEL", "HOPP", "BHOPP", "TUR", "RETUR", "NOPE",
];

proptest! {
    #[test]
    fn decoder_yields_mnemonic_or_annotation(
        b1 in any::<u8>(),
        b2 in any::<u8>(),
        image_len in 0usize..0x2000,
    ) {
        let line = disassemble_word(b1, b2, image_len, &LabelTable::new());
        if line.starts_with(';') {
            prop_assert_eq!(
                line,
                format!("; Unknown operation {b1:#x} {b2:#x}")
            );
        } else {
            let mnemonic = line.split(' ').next().unwrap_or_default();
            prop_assert!(MNEMONICS.contains(&mnemonic), "{}", line);
        }
    }

    #[test]
    fn listing_is_deterministic(
        image in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let listing = disassemble(&image);
        prop_assert!(listing.starts_with("\n; Labels:\n"));
        prop_assert!(listing.ends_with(";SLEDE8 END\n"));
        prop_assert_eq!(listing, disassemble(&image));
    }
}

//===========================================================================//
