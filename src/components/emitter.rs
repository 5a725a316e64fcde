use crate::types::CertificateRecord;

pub const PACKAGE_DECLARATION: &str = "package mobile";
pub const BUNDLE_CONSTANT: &str = "systemRootsPEM";

/// Renders the generated source holding the bundle.
///
/// The output depends only on `output_name` and the certificates, in order.
pub fn render_bundle<'a, I>(output_name: &str, certificates: I) -> String
where
    I: IntoIterator<Item = &'a CertificateRecord>,
{
    let mut source = format!(
        "// Code generated by {} --output {}; DO NOT EDIT.\n\n{}\n\nconst {} = `\n",
        env!("CARGO_PKG_NAME"),
        output_name,
        PACKAGE_DECLARATION,
        BUNDLE_CONSTANT,
    );
    for cert in certificates {
        source.push_str(&cert.to_pem());
    }
    source.push_str("`\n");
    source
}

#[cfg(test)]
mod test {
    use super::*;

    const ISRG_PEM: &str = include_str!("../../testdata/isrg_root_x1.pem");
    const DST_PEM: &str = include_str!("../../testdata/dst_root_x3_reordered.pem");

    fn record(pem_text: &str) -> CertificateRecord {
        let pem = pem::parse(pem_text).unwrap();
        CertificateRecord::from_der(pem.into_contents()).unwrap()
    }

    #[test]
    fn empty_bundle() {
        let source = render_bundle("roots_list.go", []);
        assert_eq!(
            source,
            "// Code generated by roots-gen --output roots_list.go; DO NOT EDIT.\n\
             \n\
             package mobile\n\
             \n\
             const systemRootsPEM = `\n\
             `\n"
        );
    }

    #[test]
    fn concatenates_pem_blocks_in_order() {
        let certs = [record(DST_PEM), record(ISRG_PEM)];

        let source = render_bundle("out/roots.go", &certs);

        let expected = format!(
            "// Code generated by roots-gen --output out/roots.go; DO NOT EDIT.\n\n\
             package mobile\n\n\
             const systemRootsPEM = `\n{DST_PEM}{ISRG_PEM}`\n"
        );
        assert_eq!(source, expected);
        assert_eq!(source, render_bundle("out/roots.go", &certs));
    }
}
